// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for submission simulation.

use serde_json::{json, Value};
use std::net::{IpAddr, Ipv4Addr};

/// Generate a pool of client addresses for testing.
pub fn generate_ips(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = ((i >> 16) & 0xFF) as u8;
            let b = ((i >> 8) & 0xFF) as u8;
            let c = (i & 0xFF) as u8;
            IpAddr::V4(Ipv4Addr::new(10, a, b, c)).to_string()
        })
        .collect()
}

/// A complete inquiry rendered `fill_ms` before `now_ms`.
pub fn inquiry(now_ms: i64, fill_ms: i64) -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "company": "Analytical Engines Ltd",
        "projectType": "Mobile App",
        "budget": "$25k-$50k",
        "timeline": "Q3",
        "message": "We would like a companion app for our engine.",
        "startedAt": now_ms - fill_ms,
        "hp": "",
        "userAgent": "Mozilla/5.0 (Macintosh)",
    })
}

/// The same inquiry with the honeypot filled, as a naive bot would.
pub fn bot_inquiry(now_ms: i64, index: usize) -> Value {
    let mut value = inquiry(now_ms, 50);
    value["hp"] = json!(format!("https://cheap-seo-{}.example", index));
    value
}

/// Inquiries each missing one required field.
pub fn incomplete_inquiries(now_ms: i64) -> Vec<Value> {
    ["name", "email", "projectType", "message"]
        .iter()
        .map(|field| {
            let mut value = inquiry(now_ms, 10_000);
            value[*field] = json!("");
            value
        })
        .collect()
}

/// Markup injection attempts for free-text fields.
pub fn injection_strings() -> Vec<&'static str> {
    vec![
        "<script>alert(1)</script>",
        "<img src=x onerror=alert(1)>",
        "</pre><a href=\"https://evil.example\">click</a>",
        "&lt;already escaped&gt;",
        "<!-- comment -->",
    ]
}
