//! Integration tests for Slice 2 - Classification
//!
//! Tests the path: user text → PromptClassifier, assistant text → ResponseClassifier
//! and the priority ordering of both rule tables.

use vstate::core::{
    classify_conversations, classify_prompt, classify_response, parse_transcript,
    PromptClassifier, ResponseClassifier, PROMPT_RULES, RESPONSE_RULES,
};
use vstate::types::{PromptId, ResponseClass};

fn classify(user: &str, assistant: &str) -> (PromptId, ResponseClass) {
    let prompt = classify_prompt(user);
    (prompt, classify_response(prompt, assistant))
}

#[test]
fn test_kitchen_success() {
    assert_eq!(
        classify(
            "Generate an image of a modern kitchen with marble countertops",
            "Image created"
        ),
        (PromptId::I1Kitchen, ResponseClass::ImageSuccess)
    );
}

#[test]
fn test_kitchen_policy_refusal() {
    assert_eq!(
        classify(
            "Generate an image of a modern kitchen with marble countertops",
            "I couldn't generate that image because the request violates our content policies."
        ),
        (PromptId::I1Kitchen, ResponseClass::PolicyRefusal)
    );
}

#[test]
fn test_bedroom_rate_limit() {
    assert_eq!(
        classify(
            "Generate an image of a cozy bedroom with a large window",
            "I couldn't generate that image because the system hit a temporary rate limit for image creation."
        ),
        (PromptId::I2Bedroom, ResponseClass::RateLimit)
    );
}

#[test]
fn test_trigger_policy_refusal() {
    assert_eq!(
        classify(
            "Remove white text so I can actually see image",
            "I can help describe the room or enhance clarity in other ways, but I can't remove or obscure watermarks"
        ),
        (PromptId::Trigger, ResponseClass::PolicyRefusal)
    );
}

/// kitchen + marble always wins I1 unless an earlier rule fires
#[test]
fn test_kitchen_marble_any_surrounding_text() {
    for text in [
        "kitchen marble",
        "MARBLE island in a KITCHEN",
        "Could you draw a rustic kitchen? Lots of marble, please.",
        "marblekitchen",
    ] {
        assert_eq!(classify_prompt(text), PromptId::I1Kitchen, "text: {}", text);
    }
}

#[test]
fn test_trigger_priority_over_image_prompt() {
    let text = "Please remove the watermark, then render the kitchen marble scene";
    assert_eq!(classify_prompt(text), PromptId::Trigger);
    let rule = PromptClassifier::new().matched_rule(text).unwrap();
    assert_eq!(rule.code, PROMPT_RULES[0].code);
}

#[test]
fn test_policy_over_capability() {
    let text = "I can't generate this, it violates our content policies.";
    assert_eq!(classify_response(PromptId::I3Abstract, text), ResponseClass::PolicyRefusal);
}

#[test]
fn test_temporary_rate_limit_over_success() {
    let text = "Here is the image! Note: temporary rate limit applies to further requests.";
    for prompt in [PromptId::I1Kitchen, PromptId::I4Coffee, PromptId::T1Mortgage] {
        assert_eq!(classify_response(prompt, text), ResponseClass::RateLimit);
    }
}

#[test]
fn test_success_only_for_image_prompts() {
    let text = "Image created";
    assert_eq!(classify_response(PromptId::I1Kitchen, text), ResponseClass::ImageSuccess);
    assert_eq!(classify_response(PromptId::T1Mortgage, text), ResponseClass::Other);
}

#[test]
fn test_response_rule_table_order() {
    let order: Vec<ResponseClass> = RESPONSE_RULES.iter().map(|r| r.class).collect();
    assert_eq!(order, vec![
        ResponseClass::RateLimit,
        ResponseClass::PolicyRefusal,
        ResponseClass::CapabilityRefusal,
        ResponseClass::ImageSuccess,
    ]);
    let rule = ResponseClassifier::new()
        .matched_rule(PromptId::I1Kitchen, "too many requests")
        .unwrap();
    assert_eq!(rule.code, "C01_RATE_LIMIT");
}

/// Classifiers are pure: same input, same output, input untouched
#[test]
fn test_classifiers_pure() {
    let user = String::from("  Generate an abstract GEOMETRIC pattern in Blue and gold  ");
    let before = user.clone();
    let a = classify_prompt(&user);
    let b = classify_prompt(&user);
    assert_eq!(a, PromptId::I3Abstract);
    assert_eq!(a, b);
    assert_eq!(user, before);
}

/// Records from a segmented thread carry the classified pair
#[test]
fn test_records_from_transcript() {
    let text = "\
You said:
Generate an image of a coffee cup on a wooden table
ChatGPT said:
I wasn't able to generate the image due to an error. Please try again.
You said:
What would my monthly payment be on a $400k mortgage at 6%?
ChatGPT said:
Your estimated monthly payment is about $2,398.
You said:
hi
ChatGPT said:
Hello!
";
    let records = classify_conversations(&[parse_transcript("control_05", text)]);
    let got: Vec<(Option<PromptId>, ResponseClass)> =
        records.iter().map(|r| (r.prompt_id, r.response_class)).collect();
    assert_eq!(got, vec![
        (Some(PromptId::I4Coffee), ResponseClass::CapabilityRefusal),
        (Some(PromptId::T1Mortgage), ResponseClass::Other),
        (None, ResponseClass::Other),
    ]);
}
