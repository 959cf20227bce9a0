//! Tests for the plan generator using a scripted provider.

mod common;

use common::{sample_request, MockProvider, Scripted};
use gutplan::error::{ErrorKind, PlannerError};
use gutplan::generation::{PlanGenerator, SYSTEM_PROMPT};
use gutplan::types::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn clean_array_yields_names_in_order() {
    let generator = PlanGenerator::new(Box::new(MockProvider::with_text(
        r#"["Overnight oats with kefir", "Lentil salad", "Miso soup", "Tempeh bowl"]"#,
    )));

    let meals = generator.generate(&sample_request()).await.unwrap();

    assert_eq!(
        meals,
        vec![
            "Overnight oats with kefir",
            "Lentil salad",
            "Miso soup",
            "Tempeh bowl"
        ]
    );
}

#[tokio::test]
async fn array_wrapped_in_prose_is_extracted() {
    let generator = PlanGenerator::new(Box::new(MockProvider::with_text(
        r#"  Here you go: ["Oatmeal","Salad"] Enjoy!  "#,
    )));

    let meals = generator.generate(&sample_request()).await.unwrap();

    assert_eq!(meals, vec!["Oatmeal", "Salad"]);
}

#[tokio::test]
async fn prose_without_array_is_invalid_format_with_raw_text() {
    let generator = PlanGenerator::new(Box::new(MockProvider::with_text(
        "I recommend eating more fiber.",
    )));

    let err = generator.generate(&sample_request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidGenerationFormat);
    assert_eq!(err.raw_response(), Some("I recommend eating more fiber."));
}

#[tokio::test]
async fn quota_exhaustion_is_distinguished() {
    let provider = MockProvider::new();
    provider.queue(Scripted::Quota);
    let generator = PlanGenerator::new(Box::new(provider));

    let err = generator.generate(&sample_request()).await.unwrap_err();

    assert!(matches!(err, PlannerError::QuotaExceeded { .. }));
    assert_eq!(err.kind(), ErrorKind::QuotaExceeded);
}

#[tokio::test]
async fn other_service_failures_propagate() {
    let provider = MockProvider::new();
    provider.queue(Scripted::Failure(500, "internal error".into()));
    let generator = PlanGenerator::new(Box::new(provider));

    let err = generator.generate(&sample_request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::GenerationService);
}

#[tokio::test]
async fn sends_system_role_then_prompt_in_a_single_call() {
    let provider = Arc::new(MockProvider::with_text(r#"["Kimchi fried rice"]"#));
    let generator = PlanGenerator::new(Box::new(provider.clone()));

    generator
        .generate(&MealPlanRequest::new("keto", "poor", "muscle gain", 6))
        .await
        .unwrap();

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let messages = &requests[0].messages;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[0].text(), SYSTEM_PROMPT);
    assert_eq!(messages[1].role, Role::User);
    assert!(messages[1].text().contains("(Day 6)"));
    assert!(messages[1].text().contains("keto"));
    assert!(messages[1].text().contains("poor"));
    assert!(messages[1].text().contains("muscle gain"));
}

#[tokio::test]
async fn settings_are_forwarded_to_provider() {
    let provider = Arc::new(MockProvider::with_text(r#"["Yogurt parfait"]"#));
    let settings = GenerationSettings::builder().temperature(0.3).build();
    let generator = PlanGenerator::new(Box::new(provider.clone())).with_settings(settings.clone());

    generator.generate(&sample_request()).await.unwrap();

    assert_eq!(provider.requests()[0].settings, settings);
}

#[tokio::test]
async fn truncated_response_that_fails_to_parse_says_so() {
    let provider = MockProvider::new();
    provider.queue(Scripted::Truncated(r#"["Miso soup", "Kimchi fri"#.into()));
    let generator = PlanGenerator::new(Box::new(provider));

    let err = generator.generate(&sample_request()).await.unwrap_err();

    match err {
        PlannerError::InvalidGenerationFormat { reason, raw } => {
            assert!(reason.contains("token limit"), "reason: {reason}");
            assert_eq!(raw, r#"["Miso soup", "Kimchi fri"#);
        }
        other => panic!("expected InvalidGenerationFormat, got {other:?}"),
    }
}

#[tokio::test]
async fn truncated_response_with_a_complete_array_still_parses() {
    let provider = MockProvider::new();
    provider.queue(Scripted::Truncated(r#"["Miso soup"] and some extra no"#.into()));
    let generator = PlanGenerator::new(Box::new(provider));

    let meals = generator.generate(&sample_request()).await.unwrap();

    assert_eq!(meals, vec!["Miso soup"]);
}

#[tokio::test]
async fn unparseable_complete_response_does_not_mention_truncation() {
    let generator = PlanGenerator::new(Box::new(MockProvider::with_text("[see below]")));

    let err = generator.generate(&sample_request()).await.unwrap_err();

    match err {
        PlannerError::InvalidGenerationFormat { reason, .. } => {
            assert!(!reason.contains("token limit"), "reason: {reason}");
        }
        other => panic!("expected InvalidGenerationFormat, got {other:?}"),
    }
}
