//! Ready-made templates for the two policy pipelines.
//!
//! The free-text pipeline pulls policy-holder identity fields out of
//! unstructured records. The fixed-width pipeline parses IBM mainframe
//! dumps; its field-layout schema and example output document are supplied
//! by the caller as opaque strings and injected ahead of the instruction
//! prompt; this crate never interprets their content.

use super::{ModelProfile, PromptTemplate};

/// System prompt for free-text policy-holder extraction.
pub const POLICY_HOLDER_PROMPT: &str = "You are an insurance policy holder data transformer that takes any incoming data, \
     identifies the fields listed below and transforms the output into the expected output format given below. \
     Fields to be identified: Firstname, Lastname, Gender, DateOfBirth, SSN, PolicyNumber. \
     Transformation rules: (1) For any given input format of DateOfBirth, the transformed dob must be in MM/dd/yyyy format. \
     (2) For any Gender input, the output must be a single character, 'M' for Male and 'F' for Female. \
     Expected output JSON format: {\"policyNumber\": \"...\", \"firstName\": \"...\", \"lastName\": \"...\", \"gender\": \"...\", \"dob\": \"...\", \"ssn\": \"...\"}. \
     Return only clean JSON without any comments, explanations, or additional text.";

/// System prompt for fixed-width mainframe extraction.
///
/// Sent after the field-layout schema and the example output document, so
/// "previous system message" references resolve.
pub const FIXED_WIDTH_PROMPT: &str = "You are a fixed-width ETL parser. Do not infer or guess. No free reasoning. \
     Extract substrings based on the fixed positions defined in the schema given in a previous system message, \
     and return JSON only, matching the example output given in a previous system message. \
     The input contains multiple record types: main policy holder data, life policy records, \
     annuity policy records, and beneficiary records. \
     Convert dates to MM/dd/yyyy format and convert zero-padded numeric fields to proper numbers. \
     Wherever a two-character USA state code appears, convert it to the full state name, \
     for example GA: Georgia, CA: California, NY: New York, TX: Texas, FL: Florida. \
     Wherever a value is Yes or No, convert it to boolean true or false. \
     Return only clean JSON without any comments, explanations, or additional text. \
     Do not include // or /* */ style comments in the response.";

/// Template for the free-text policy pipeline.
pub fn policy_holder(profile: ModelProfile) -> PromptTemplate {
    PromptTemplate::new(profile).system(POLICY_HOLDER_PROMPT)
}

/// Template for the fixed-width mainframe pipeline.
///
/// `schema` is the field-layout description for the fixed-width format;
/// `example` is a complete example output document. Both are passed through
/// verbatim as the first two system messages.
pub fn fixed_width(
    schema: impl Into<String>,
    example: impl Into<String>,
    profile: ModelProfile,
) -> PromptTemplate {
    PromptTemplate::new(profile)
        .system(schema)
        .system(example)
        .system(FIXED_WIDTH_PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_holder_has_one_system_message() {
        let template = policy_holder(ModelProfile::new("m"));
        assert_eq!(template.system_messages().len(), 1);
        assert!(template.validate().is_ok());
    }

    #[test]
    fn fixed_width_stacks_schema_example_then_instructions() {
        let template = fixed_width("SCHEMA TEXT", "EXAMPLE DOC", ModelProfile::new("m"));
        let messages = template.system_messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], "SCHEMA TEXT");
        assert_eq!(messages[1], "EXAMPLE DOC");
        assert_eq!(messages[2], FIXED_WIDTH_PROMPT);
    }
}
