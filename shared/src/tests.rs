#[cfg(test)]
mod tests {
    use crate::models::{CreatePollRequest, Poll};
    use crate::validation::{validate_poll_request, ValidationError, MAX_OPTIONS};
    use crate::{ErrorCode, ErrorResponse};

    fn request(title: &str, options: &[&str]) -> CreatePollRequest {
        CreatePollRequest {
            title: title.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            multi_select: false,
            min_choices: 0,
            max_choices: 0,
        }
    }

    #[test]
    fn test_new_poll_has_zeroed_ledger() {
        let poll = Poll::new(request("Lunch?", &["Pizza", "Sushi"]));
        assert_eq!(poll.title, "Lunch?");
        assert_eq!(poll.options, vec!["Pizza", "Sushi"]);
        assert_eq!(poll.votes.len(), 2);
        assert_eq!(poll.votes["Pizza"], 0);
        assert_eq!(poll.votes["Sushi"], 0);
        assert_eq!(poll.voter_count, 0);
        assert_eq!(poll.created_at.offset(), time::UtcOffset::UTC);
    }

    #[test]
    fn test_new_polls_get_distinct_ids() {
        let a = Poll::new(request("A", &["x"]));
        let b = Poll::new(request("A", &["x"]));
        assert_ne!(a.id, b.id);
        assert!(b.created_at >= a.created_at);
    }

    #[test]
    fn test_duplicate_options_share_one_entry() {
        let poll = Poll::new(request("Dup", &["Tea", "Tea", "Coffee"]));
        assert_eq!(poll.options.len(), 3);
        assert_eq!(poll.votes.len(), 2);
    }

    #[test]
    fn test_record_ballot_skips_unknown_options() {
        let mut poll = Poll::new(request("Lunch?", &["Pizza", "Sushi"]));
        poll.record_ballot(&["Pizza".into(), "Tacos".into()]);
        assert_eq!(poll.voter_count, 1);
        assert_eq!(poll.votes["Pizza"], 1);
        assert_eq!(poll.votes["Sushi"], 0);
        assert!(!poll.votes.contains_key("Tacos"));

        poll.record_ballot(&[]);
        assert_eq!(poll.voter_count, 2);
        assert_eq!(poll.votes.values().sum::<u64>(), 1);
    }

    #[test]
    fn test_record_ballot_counts_repeated_names() {
        let mut poll = Poll::new(request("Lunch?", &["Pizza", "Sushi"]));
        poll.record_ballot(&["Pizza".into(), "Pizza".into()]);
        assert_eq!(poll.voter_count, 1);
        assert_eq!(poll.votes["Pizza"], 2);
    }

    #[test]
    fn test_poll_json_shape() {
        let poll = Poll::new(request("Lunch?", &["Pizza"]));
        let value = serde_json::to_value(&poll).unwrap();
        for key in ["id", "title", "options", "multi_select", "min_choices", "max_choices", "votes", "voter_count", "created_at"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert!(value["created_at"].is_string());

        let back: Poll = serde_json::from_value(value).unwrap();
        assert_eq!(back, poll);
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreatePollRequest =
            serde_json::from_str(r#"{"title":"Q","options":["a","b"]}"#).unwrap();
        assert!(!req.multi_select);
        assert_eq!(req.min_choices, 0);
        assert_eq!(req.max_choices, 0);
    }

    #[test]
    fn test_validation() {
        assert!(validate_poll_request(&request("Lunch?", &["Pizza"])).is_ok());
        assert_eq!(validate_poll_request(&request("  ", &["Pizza"])), Err(ValidationError::EmptyTitle));
        assert_eq!(validate_poll_request(&request("Lunch?", &[])), Err(ValidationError::NoOptions));
        assert_eq!(validate_poll_request(&request("Lunch?", &["Pizza", ""])), Err(ValidationError::EmptyOption));

        let long = "x".repeat(500);
        assert_eq!(validate_poll_request(&request(&long, &["a"])), Err(ValidationError::TitleTooLong));
        assert_eq!(validate_poll_request(&request("Q", &[long.as_str()])), Err(ValidationError::OptionTooLong));

        let many: Vec<String> = (0..=MAX_OPTIONS).map(|i| i.to_string()).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        assert_eq!(validate_poll_request(&request("Q", &many)), Err(ValidationError::TooManyOptions));
    }

    #[test]
    fn test_validation_leaves_limits_and_duplicates_alone() {
        let mut req = request("Q", &["a", "a"]);
        req.min_choices = 5;
        req.max_choices = 1;
        assert!(validate_poll_request(&req).is_ok());
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new(ErrorCode::NotFound, "Poll not found")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "notFound");
        assert_eq!(body["error"], "Poll not found");
    }

    #[test]
    fn test_reserved_conflict_code_keeps_wire_name() {
        assert_eq!(serde_json::to_value(ErrorCode::Conflict).unwrap(), "conflict");
        let parsed: ErrorCode = serde_json::from_str("\"conflict\"").unwrap();
        assert_eq!(parsed, ErrorCode::Conflict);
    }
}
