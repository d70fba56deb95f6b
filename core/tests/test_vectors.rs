//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and either an expected record or an expected error class. Records are
//! compared as typed values, so timestamps compare as instants and field
//! ordering in the vector files does not matter.

use oura_core::{
    CalendarDate, ClientConfig, DailyActivityRecord, DateRange, HttpRequest, HttpResponse, OuraClient,
    OuraError, Page, PersonalInfoRecord, SleepSessionRecord, SleepTimeRecord,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/v2";

fn client() -> OuraClient {
    OuraClient::new(ClientConfig::new("vector-token").with_base_url(BASE_URL))
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );

    let expected_query: Vec<(String, String)> = expected["query"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.query, expected_query, "{name}: query");

    assert_eq!(
        req.headers,
        vec![("authorization".to_string(), "Bearer vector-token".to_string())],
        "{name}: headers"
    );
}

/// Compare a parse result with the case's `expected_result` or `expected_error`.
fn check_result<T>(name: &str, case: &Value, result: Result<T, OuraError>)
where
    T: DeserializeOwned + PartialEq + std::fmt::Debug,
{
    if let Some(expected_error) = case.get("expected_error") {
        let err = result.unwrap_err();
        match expected_error["kind"].as_str().unwrap() {
            "Api" => {
                let OuraError::Api { code, message } = &err else {
                    panic!("{name}: expected Api error, got {err:?}");
                };
                assert_eq!(u64::from(*code), expected_error["code"].as_u64().unwrap(), "{name}: code");
                if let Some(expected_message) = expected_error.get("message") {
                    assert_eq!(message, expected_message.as_str().unwrap(), "{name}: message");
                }
            }
            "Decode" => {
                let OuraError::Decode { field, .. } = &err else {
                    panic!("{name}: expected Decode error, got {err:?}");
                };
                assert_eq!(field, expected_error["field"].as_str().unwrap(), "{name}: field");
            }
            other => panic!("{name}: unknown expected_error kind: {other}"),
        }
    } else {
        let record = result.unwrap_or_else(|e| panic!("{name}: unexpected error: {e}"));
        let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(record, expected, "{name}: parsed result");
    }
}

fn input_range(case: &Value) -> DateRange {
    let input = &case["input_range"];
    let date = |key: &str| input.get(key).map(|v| CalendarDate::parse(v.as_str().unwrap()).unwrap());
    DateRange {
        start_date: date("start_date"),
        end_date: date("end_date"),
        next_token: input.get("next_token").map(|v| v.as_str().unwrap().to_string()),
    }
}

// ---------------------------------------------------------------------------
// Daily activity
// ---------------------------------------------------------------------------

#[test]
fn daily_activity_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/daily_activity.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_daily_activity(id);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_daily_activity(simulated_response(&case));
        check_result::<DailyActivityRecord>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Personal info
// ---------------------------------------------------------------------------

#[test]
fn personal_info_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/personal_info.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_personal_info();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_personal_info(simulated_response(&case));
        check_result::<PersonalInfoRecord>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Sleep time
// ---------------------------------------------------------------------------

#[test]
fn sleep_time_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/sleep_time.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_sleep_time(id);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_sleep_time(simulated_response(&case));
        check_result::<SleepTimeRecord>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Sleep
// ---------------------------------------------------------------------------

#[test]
fn sleep_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/sleep.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_sleep(id);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_sleep(simulated_response(&case));
        check_result::<SleepSessionRecord>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        let range = input_range(&case);

        let req = c.build_sleeps(&range);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_sleeps(simulated_response(&case));
        check_result::<Page<SleepSessionRecord>>(name, &case, result);
    }
}
