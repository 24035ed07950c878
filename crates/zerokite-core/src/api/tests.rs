use serde_json::json;

use super::*;

fn raw(status_code: u16, body: &str) -> RawResponse {
    RawResponse {
        status_code,
        body: body.as_bytes().to_vec(),
    }
}

#[test]
fn normalization_table() {
    struct Case {
        status: u16,
        body: &'static str,
        expected: Result<ApiBody, (&'static str, &'static str, Option<u16>)>,
    }

    let cases = [
        Case {
            status: 500,
            body: r#"{"message":"x"}"#,
            expected: Err(("ApiError", "x", Some(500))),
        },
        Case {
            status: 200,
            body: r#"{"status":"error","message":"y","error_type":"InputException"}"#,
            expected: Err(("InputException", "y", Some(200))),
        },
        Case {
            status: 200,
            body: r#"{"data":{"a":1}}"#,
            expected: Ok(ApiBody::Structured(json!({"a": 1}))),
        },
        Case {
            status: 403,
            body: r#"{"status":"error","message":"Invalid token","error_type":"TokenException"}"#,
            expected: Err(("TokenException", "Invalid token", Some(403))),
        },
        Case {
            status: 502,
            body: "<html>Bad Gateway</html>",
            expected: Err(("ApiError", "HTTP 502", Some(502))),
        },
        Case {
            status: 404,
            body: "",
            expected: Err(("ApiError", "HTTP 404", Some(404))),
        },
        Case {
            status: 200,
            body: r#"{"status":"error"}"#,
            expected: Err(("ApiError", "API error", Some(200))),
        },
        Case {
            status: 200,
            body: r#"{"status":"success","user_id":"U1"}"#,
            expected: Ok(ApiBody::Structured(
                json!({"status": "success", "user_id": "U1"}),
            )),
        },
        Case {
            status: 200,
            body: "plain text",
            expected: Ok(ApiBody::Raw("plain text".to_string())),
        },
        Case {
            status: 204,
            body: "",
            expected: Ok(ApiBody::Structured(serde_json::Value::Null)),
        },
    ];

    for case in cases {
        let result = normalize(raw(case.status, case.body));
        match (result, case.expected) {
            (Ok(actual), Ok(expected)) => assert_eq!(actual, expected, "body {}", case.body),
            (Err(err), Err((kind, message, status))) => {
                assert_eq!(err.kind, kind, "body {}", case.body);
                assert_eq!(err.message, message, "body {}", case.body);
                assert_eq!(err.status_code, status, "body {}", case.body);
            }
            (actual, expected) => panic!(
                "body {}: expected {:?}, got {:?}",
                case.body,
                expected.is_ok(),
                actual
            ),
        }
    }
}

#[test]
fn error_keeps_raw_body() {
    let err = normalize(raw(400, r#"{"message":"bad","extra":true}"#)).expect_err("error");
    assert_eq!(
        err.raw_body,
        Some(ApiBody::Structured(json!({"message": "bad", "extra": true})))
    );
    assert_eq!(err.to_string(), "bad");
}

#[test]
fn raw_text_body_on_error_uses_status_message() {
    let err = normalize(raw(503, "maintenance")).expect_err("error");
    assert_eq!(err.message, "HTTP 503");
    assert_eq!(err.raw_body, Some(ApiBody::Raw("maintenance".to_string())));
}

#[test]
fn body_field_lookup_ignores_non_objects() {
    assert!(ApiBody::Raw("x".to_string()).field("data").is_none());
    assert!(ApiBody::Structured(json!([1, 2])).field("data").is_none());
    assert_eq!(
        ApiBody::Raw("x".to_string()).into_json(),
        serde_json::Value::String("x".to_string())
    );
}
