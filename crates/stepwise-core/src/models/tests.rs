#[cfg(test)]
mod model_tests {
    use serde_json::json;

    use crate::models::{
        FallbackMaterial, Plan, PlanSummary, QuizData, ResolvedResource, Reward, ScoreResponse,
        User,
    };

    fn quiz() -> QuizData {
        QuizData {
            question: "What does `&` create?".to_string(),
            options: vec![
                "A reference".to_string(),
                "A copy".to_string(),
                "A box".to_string(),
            ],
            answer_index: 0,
            hint: "It borrows".to_string(),
        }
    }

    #[test]
    fn test_backend_plan_deserializes_without_timestamp() {
        let plan: Plan = serde_json::from_value(json!({
            "id": 12,
            "title": "Grade 5 fractions",
            "content_md": "1. Halves\nSplit a pizza\n2. Quarters\nSplit it again"
        }))
        .unwrap();

        assert_eq!(plan.id, 12);
        assert!(plan.created_at.is_none());
        assert_eq!(plan.steps().len(), 2);

        let serialized = serde_json::to_value(&plan).unwrap();
        assert!(serialized.get("created_at").is_none());
    }

    #[test]
    fn test_plan_summary_counts_parsed_steps() {
        let plan = Plan {
            id: 1,
            title: "Rust".to_string(),
            content_md: "Intro\n1. a\n2. b\n3. c".to_string(),
            created_at: None,
        };

        let summary = PlanSummary::from(&plan);

        assert_eq!(summary.total_steps, 3);
        assert_eq!(summary.title, "Rust");
    }

    #[test]
    fn test_quiz_from_backend_json() {
        let parsed: QuizData = serde_json::from_value(json!({
            "question": "What does `&` create?",
            "options": ["A reference", "A copy", "A box"],
            "answer_index": 0,
            "hint": "It borrows"
        }))
        .unwrap();

        assert_eq!(parsed, quiz());
        assert_eq!(parsed.correct_option(), Some("A reference"));
    }

    #[test]
    fn test_out_of_range_answer_index_never_matches() {
        let mut quiz = quiz();
        quiz.answer_index = 3;

        assert_eq!(quiz.correct_option(), None);
        assert!(quiz.options.iter().all(|option| !quiz.is_correct(option)));
    }

    #[test]
    fn test_negative_answer_index_is_accepted() {
        let parsed: QuizData = serde_json::from_value(json!({
            "question": "What does `&` create?",
            "options": ["A reference", "A copy", "A box"],
            "answer_index": -1,
            "hint": "It borrows"
        }))
        .unwrap();

        assert_eq!(parsed.answer_index, -1);
        assert_eq!(parsed.correct_option(), None);
        assert!(parsed.options.iter().all(|option| !parsed.is_correct(option)));
    }

    #[test]
    fn test_option_for_input_prefers_numeric_option_text() {
        let mut quiz = quiz();
        quiz.options = vec!["3".to_string(), "1".to_string(), "2".to_string()];

        assert_eq!(quiz.option_for_input("1"), Some("1"));
        assert_eq!(quiz.option_for_input(" 3 "), Some("3"));

        quiz.options = vec!["4".to_string(), "2".to_string(), "8".to_string()];

        assert_eq!(quiz.option_for_input("8"), Some("8"));
        assert_eq!(quiz.option_for_input("3"), Some("8"));
        assert_eq!(quiz.option_for_input("5"), None);
    }

    #[test]
    fn test_option_for_input() {
        let quiz = quiz();

        assert_eq!(quiz.option_for_input("2"), Some("A copy"));
        assert_eq!(quiz.option_for_input(" A box "), Some("A box"));
        assert_eq!(quiz.option_for_input("0"), None);
        assert_eq!(quiz.option_for_input("4"), None);
        assert_eq!(quiz.option_for_input("a reference"), None);
    }

    #[test]
    fn test_score_response_with_missing_fields() {
        let response: ScoreResponse = serde_json::from_value(json!({
            "points_awarded": 2,
            "new_total_points": 17
        }))
        .unwrap();

        let reward = Reward::from(&response);

        assert_eq!(reward.points, Some(2));
        assert_eq!(reward.total_points, Some(17));
        assert_eq!(reward.kudos, None);
        assert!(!reward.is_empty());
    }

    #[test]
    fn test_zero_kudos_is_dropped() {
        let response = ScoreResponse {
            points_awarded: Some(0),
            new_total_points: Some(5),
            kudos_awarded: Some(0),
        };

        assert_eq!(Reward::from(&response).kudos, None);
    }

    #[test]
    fn test_fallback_material_with_nulls() {
        let material: FallbackMaterial = serde_json::from_value(json!({
            "resource_link": null,
            "text_material": "Read about cells."
        }))
        .unwrap();

        assert_eq!(
            ResolvedResource::from(material),
            ResolvedResource::Text("Read about cells.".to_string())
        );
    }

    #[test]
    fn test_user_defaults_balances() {
        let user: User = serde_json::from_value(json!({
            "id": 3,
            "name": "sam",
            "email": "sam@mail.test"
        }))
        .unwrap();

        assert_eq!(user.total_points, 0);
        assert_eq!(user.kudos, None);
    }

    #[test]
    fn test_resolved_resource_serde_shape() {
        let value = serde_json::to_value(ResolvedResource::Url("https://a.test".to_string())).unwrap();
        assert_eq!(value, json!({ "kind": "url", "value": "https://a.test" }));

        let none = serde_json::to_value(ResolvedResource::None).unwrap();
        assert_eq!(none, json!({ "kind": "none" }));
    }
}
