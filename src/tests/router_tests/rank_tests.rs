use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{candidate, post_json, read_json, test_config};
use serde_json::json;

fn austin_preferences() -> serde_json::Value {
    json!({
        "city": "Austin",
        "budget": 400000,
        "desired_square_feet": 1500,
        "desired_bedrooms": 3,
        "desired_bathrooms": 2,
        "desired_amenities": ["pool"]
    })
}

#[test]
fn rank_returns_best_match_first_with_scores() {
    let body = json!({
        "preferences": austin_preferences(),
        "candidates": [
            candidate("L2", "Dallas", 399000, 1500, 3, 2, &["pool"]),
            candidate("L1", "Austin", 400000, 1500, 3, 2, &["pool", "garage"]),
        ],
        "top_n": 1
    });

    let resp = handle(post_json("/rank", &body), &test_config()).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let json = read_json(resp);
    assert_eq!(json["top_n"], 1);
    assert_eq!(json["candidates"], 2);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["rank"], 1);
    assert_eq!(results[0]["score"], 12.5);
    assert_eq!(results[0]["listing"]["title"], "L1");
    assert_eq!(results[0]["listing"]["city"], "Austin");
    assert_eq!(results[0]["listing"]["amenities"], json!(["pool", "garage"]));
}

#[test]
fn rank_defaults_to_configured_top_n() {
    let candidates: Vec<_> = (0..5)
        .map(|i| candidate(&format!("L{i}"), "Berlin", 300000, 1000, 2, 1, &[]))
        .collect();
    let body = json!({ "candidates": candidates });

    let json = read_json(handle(post_json("/rank", &body), &test_config()).unwrap());
    let titles: Vec<_> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["listing"]["title"].as_str().unwrap().to_string())
        .collect();

    // No preferences: every score is 0, so input order survives.
    assert_eq!(json["top_n"], 3);
    assert_eq!(titles, vec!["L0", "L1", "L2"]);
}

#[test]
fn rank_with_two_candidates_and_top_three_returns_two() {
    let body = json!({
        "preferences": austin_preferences(),
        "candidates": [
            candidate("A", "Austin", 1, 1, 1, 1, &[]),
            candidate("B", "Austin", 1, 1, 1, 1, &[]),
        ],
        "top_n": 3
    });

    let json = read_json(handle(post_json("/rank", &body), &test_config()).unwrap());
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["listing"]["title"], "A");
    assert_eq!(results[1]["listing"]["title"], "B");
}

#[test]
fn rank_with_no_candidates_is_empty_success() {
    let body = json!({ "preferences": austin_preferences(), "candidates": [] });

    let resp = handle(post_json("/rank", &body), &test_config()).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp)["results"], json!([]));
}

#[test]
fn rank_rejects_non_positive_top_n() {
    for top_n in [0, -2] {
        let body = json!({
            "candidates": [candidate("A", "Austin", 1, 1, 1, 1, &[])],
            "top_n": top_n
        });

        let err = handle(post_json("/rank", &body), &test_config()).unwrap_err();
        assert!(matches!(err, ServerError::InvalidInput(_)), "top_n {top_n}: {err}");

        let resp = error_to_response(err);
        assert_eq!(resp.status(), 400);
        assert_eq!(read_json(resp)["error"], "invalid_input");
    }
}

#[test]
fn rank_rejects_malformed_candidates() {
    let missing_price = json!({
        "candidates": [{ "city": "Austin", "square_feet": 1, "bedrooms": 1, "bathrooms": 1 }]
    });
    let err = handle(post_json("/rank", &missing_price), &test_config()).unwrap_err();
    assert!(matches!(err, ServerError::InvalidInput(_)));

    let not_a_list = json!({ "candidates": { "city": "Austin" } });
    let err = handle(post_json("/rank", &not_a_list), &test_config()).unwrap_err();
    assert!(matches!(err, ServerError::InvalidInput(_)));

    let negative_price = json!({
        "candidates": [candidate("A", "Austin", 1, 1, 1, 1, &[]), {
            "city": "Austin", "price": -1, "square_feet": 1, "bedrooms": 1, "bathrooms": 1
        }]
    });
    match handle(post_json("/rank", &negative_price), &test_config()) {
        Err(ServerError::InvalidInput(msg)) => assert!(msg.contains("candidate 1"), "{msg}"),
        other => panic!("expected InvalidInput, got {:?}", other.map(|r| r.status())),
    }
}

#[test]
fn rank_accepts_raw_form_inputs() {
    let body = json!({
        "inputs": {
            "city": "munich",
            "budget": "€500,000",
            "features": "2 bedrooms and 1 bath",
            "amenities": "Balcony"
        },
        "candidates": [
            candidate("Far", "Berlin", 900000, 900, 4, 3, &[]),
            candidate("Near", "Munich", 500000, 900, 2, 1, &["balcony"]),
        ]
    });

    let json = read_json(handle(post_json("/rank", &body), &test_config()).unwrap());
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["listing"]["title"], "Near");
    assert_eq!(results[0]["score"], 10.5);
    assert!(json["query"].as_str().unwrap().contains("My preferred city is munich."));
}

#[test]
fn rank_refuses_both_preference_shapes() {
    let body = json!({
        "preferences": austin_preferences(),
        "inputs": { "city": "Austin" },
        "candidates": []
    });

    let err = handle(post_json("/rank", &body), &test_config()).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn rank_enforces_candidate_and_body_limits() {
    let config = test_config();

    let too_many: Vec<_> = (0..config.max_candidates + 1)
        .map(|i| candidate(&format!("L{i}"), "Berlin", 1, 1, 1, 1, &[]))
        .collect();
    let err = handle(post_json("/rank", &json!({ "candidates": too_many })), &config).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    let huge = "x".repeat(config.max_body_bytes);
    let body = json!({ "candidates": [], "padding": huge });
    let err = handle(post_json("/rank", &body), &config).unwrap_err();
    assert!(matches!(err, ServerError::PayloadTooLarge(_)));
    assert_eq!(error_to_response(err).status(), 413);
}
