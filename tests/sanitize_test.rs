//! Tests for `sanitize::clean`: fence and comment stripping guarantees.

use munin::sanitize::clean;

#[test]
fn fence_stripping() {
    assert_eq!(clean("```json\n{\"a\":1}\n```"), "{\"a\":1}");
}

#[test]
fn fence_tag_is_case_insensitive() {
    assert_eq!(clean("```JSON\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(clean("```Json\n{\"a\":1}\n```"), "{\"a\":1}");
}

#[test]
fn untagged_fence_is_stripped() {
    assert_eq!(clean("```\n{\"a\":1}\n```"), "{\"a\":1}");
}

#[test]
fn no_fences_means_no_mutation() {
    let inputs = [
        "{\"a\":1}",
        "{\n  \"nested\": {\"b\": [1, 2, 3]}\n}",
        "Sorry, I cannot process this.",
    ];
    for input in inputs {
        assert_eq!(clean(input), input, "input {input:?} should pass through");
    }
}

#[test]
fn comment_stripping_preserves_quoted_slashes() {
    let input = r#"{"url":"http://x"}"#;
    assert_eq!(clean(input), input);
}

#[test]
fn comment_stripping_preserves_date_fields() {
    let input = r#"{"dob":"12/25/1985","anniversaryDate":"03/05/2019"}"#;
    assert_eq!(clean(input), input);
}

#[test]
fn line_comments_outside_strings_are_removed() {
    let input = "{\n\"premium\": 2650, // annual\n\"dividend\": 500\n}";
    assert_eq!(clean(input), "{\n\"premium\": 2650,\n\"dividend\": 500\n}");
}

#[test]
fn block_comments_outside_strings_are_removed() {
    let input = "{\"premium\": /* from record 2 */ 2650}";
    assert_eq!(clean(input), "{\"premium\":  2650}");
}

#[test]
fn idempotence_without_fences() {
    let inputs = [
        "{\"a\": 1}",
        "{\n\"a\": 1, // note\n\"b\": 2\n}",
        "plain prose reply",
        "{\"url\":\"http://x\"} // trailing",
    ];
    for input in inputs {
        let once = clean(input);
        assert_eq!(clean(&once), once, "clean not idempotent for {input:?}");
    }
}

#[test]
fn cleaned_fenced_reply_decodes() {
    let reply = "```json\n{\n\"policyNumber\": \"INS-2024-001\", // from header\n\"premium\": 2650\n}\n```";
    let cleaned = clean(reply);
    let value: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
    assert_eq!(value["policyNumber"], "INS-2024-001");
    assert_eq!(value["premium"], 2650);
}

#[test]
fn whitespace_is_trimmed() {
    assert_eq!(clean("\n  {\"a\":1}  \n"), "{\"a\":1}");
}
