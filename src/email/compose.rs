// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTML composition for the inquiry notification and the auto-reply.
//!
//! Every submitted value passes through [`escape_html`] before it is
//! embedded in markup.

use super::OutboundEmail;
use crate::validator::ValidatedInquiry;

const FONT_STACK: &str = "ui-sans-serif,system-ui,-apple-system,Segoe UI,Roboto,Helvetica,Arial";

/// Marker shown in the notification when the fill-time heuristic fired.
pub const SPAM_MARKER: &str = "⚠ suspected spam (fast submit)";

/// Request facts recorded alongside the inquiry.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionMeta<'a> {
    pub client_key: &'a str,
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Notification to the internal inbox. Replies go to the submitter.
pub fn notification(
    inquiry: &ValidatedInquiry,
    meta: SubmissionMeta<'_>,
    from: &str,
    to: &[String],
) -> OutboundEmail {
    let optional_rows: String = [
        ("Company", &inquiry.company),
        ("Phone", &inquiry.phone),
        ("Budget", &inquiry.budget),
        ("Timeline", &inquiry.timeline),
    ]
    .iter()
    .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
    .map(|(label, value)| format!("<p><strong>{}:</strong> {}</p>\n", label, escape_html(value)))
    .collect();

    let spam_note = if inquiry.suspected_spam {
        format!(" • {}", SPAM_MARKER)
    } else {
        String::new()
    };

    let html = format!(
        r#"<h2>New Project Inquiry</h2>
<p><strong>Name:</strong> {name}</p>
<p><strong>Email:</strong> {email}</p>
{optional_rows}<p><strong>Project Type:</strong> {project_type}</p>
<hr />
<p><strong>Message:</strong></p>
<pre style="white-space:pre-wrap;font-family:{font};">
{message}
</pre>
<hr />
<p style="color:#64748b">
Meta: IP={ip} • UA={ua} • Elapsed={elapsed}ms{spam_note}
</p>
"#,
        name = escape_html(&inquiry.name),
        email = escape_html(&inquiry.email),
        optional_rows = optional_rows,
        project_type = escape_html(&inquiry.project_type),
        font = FONT_STACK,
        message = escape_html(&inquiry.message),
        ip = escape_html(meta.client_key),
        ua = escape_html(&inquiry.user_agent),
        elapsed = inquiry.elapsed_ms,
        spam_note = spam_note,
    );

    OutboundEmail {
        from: from.to_string(),
        to: to.to_vec(),
        subject: format!("New inquiry: {} — {}", inquiry.project_type, inquiry.name),
        html,
        reply_to: Some(inquiry.email.clone()),
    }
}

/// Acknowledgement to the submitter. Replies go to the first internal recipient.
pub fn auto_reply(
    inquiry: &ValidatedInquiry,
    from: &str,
    reply_to: Option<&str>,
    site_name: &str,
) -> OutboundEmail {
    let summary_rows: String = [
        ("Project Type", Some(&inquiry.project_type)),
        ("Budget", inquiry.budget.as_ref()),
        ("Timeline", inquiry.timeline.as_ref()),
    ]
    .iter()
    .filter_map(|(label, value)| value.map(|v| (label, v)))
    .map(|(label, value)| format!("<li><strong>{}:</strong> {}</li>\n", label, escape_html(value)))
    .collect();

    let site = escape_html(site_name);
    let html = format!(
        r#"<div style="font-family:{font};line-height:1.5">
<h2>Thanks, {name}!</h2>
<p>We've received your message and will get back to you within 1 business day.</p>
<p><strong>Summary</strong></p>
<ul>
{summary_rows}</ul>
<p style="margin-top:16px">If you have more details to share, just reply to this email.</p>
<p style="margin-top:24px;color:#64748b">— {site}</p>
</div>
"#,
        font = FONT_STACK,
        name = escape_html(&inquiry.name),
        summary_rows = summary_rows,
        site = site,
    );

    OutboundEmail {
        from: from.to_string(),
        to: vec![inquiry.email.clone()],
        subject: format!("We received your inquiry — {}", site_name),
        html,
        reply_to: reply_to.map(str::to_string),
    }
}
