use serde_json::{json, Value};

pub fn personal_info() -> Value {
    json!({
        "id": "8f9a5221-639e-4a85-81cb-4065ef23f979",
        "age": 31,
        "height": 1.8,
        "weight": 78.5,
        "biological_sex": "male",
        "email": "someone@example.com"
    })
}

pub fn daily_activities() -> Vec<Value> {
    vec![
        daily_activity("45173cbe-ef26-430f-adc4-c4a1424b45ab", "2024-01-01", 96, 5797),
        daily_activity("c1f5a1a0-4f7e-4b7e-9a52-1d1f6b0e2b11", "2024-01-02", 82, 9120),
        daily_activity("0b0e1f5d-2c4a-4d8e-8a8f-7f3e5c9d2a01", "2024-01-03", 74, 3311),
    ]
}

fn daily_activity(id: &str, day: &str, score: i32, steps: i32) -> Value {
    json!({
        "id": id,
        "class_5_min": "1111223211111111111111111111",
        "score": score,
        "active_calories": 286,
        "average_met_minutes": 1.3125,
        "contributors": {
            "meet_daily_targets": 100,
            "move_every_hour": 95,
            "recovery_time": 97,
            "stay_active": 81,
            "training_frequency": 100,
            "training_volume": 100
        },
        "equivalent_walking_distance": 5195,
        "high_activity_met_minutes": 13,
        "high_activity_time": 120,
        "inactivity_alerts": 1,
        "low_activity_met_minutes": 156,
        "low_activity_time": 13620,
        "medium_activity_met_minutes": 50,
        "medium_activity_time": 1020,
        "met": {
            "interval": 60,
            "items": [0.9, 0.9, 1.1, 1.4, 3.1, 7.7, 0.1],
            "timestamp": format!("{day}T04:00:00.000-05:00")
        },
        "meters_to_target": -500,
        "non_wear_time": 1200,
        "resting_time": 40200,
        "sedentary_met_minutes": 9,
        "sedentary_time": 30240,
        "steps": steps,
        "target_calories": 250,
        "target_meters": 6000,
        "total_calories": 2382,
        "day": day,
        "timestamp": format!("{day}T04:00:00-05:00")
    })
}

pub fn sleep_times() -> Vec<Value> {
    vec![
        json!({
            "id": "bb1044c6-6d85-406b-9bcd-0ce7dd438608",
            "day": "2024-01-12",
            "optimal_bedtime": null,
            "recommendation": "earlier_bedtime",
            "status": "only_recommended_found"
        }),
        json!({
            "id": "e2b7a9f3-51c4-4d0a-9e7b-3c2f1a6d8e40",
            "day": "2024-01-13",
            "optimal_bedtime": {"day_tz": 1, "end_offset": 2, "start_offset": 3},
            "recommendation": "follow_optimal_bedtime",
            "status": "optimal_found"
        }),
    ]
}

pub fn sleeps() -> Vec<Value> {
    vec![
        sleep("4eaa0e18-3464-49cc-961a-2ffd5f8ea98e", "2024-01-07", 83),
        sleep("7d3c2b1a-9f8e-4d6c-b5a4-3e2f1d0c9b8a", "2024-01-08", 77),
        sleep("a9b8c7d6-e5f4-4a3b-8c2d-1e0f9a8b7c6d", "2024-01-09", 91),
    ]
}

fn sleep(id: &str, day: &str, score: i32) -> Value {
    json!({
        "id": id,
        "contributors": {
            "deep_sleep": 63,
            "efficiency": 93,
            "latency": 64,
            "rem_sleep": 95,
            "restfulness": 72,
            "timing": 94,
            "total_sleep": 90
        },
        "day": day,
        "score": score,
        "timestamp": format!("{day}T00:00:00+00:00")
    })
}
