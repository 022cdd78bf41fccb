//! Synthetic render context for previews.
//!
//! [`MockContext`] is one fixed-shape record covering every field the email
//! templates dereference, so any template in the catalog renders without a
//! per-template data contract. Field names follow the templates' own
//! PascalCase convention (`{{ Subscriber.FirstName }}`, `{{ UnsubURL }}`).
//! No field is ever absent or none: the set renders with strict undefined
//! behavior and a missing field is a hard error.
//!
//! Context variables shadow environment globals, so no field may share a
//! name with a helper (`RootURL`, `LogoURL`, `Date`, ...).

use crate::functions::Helpers;
use serde::Serialize;
use uuid::Uuid;

/// Fixed timestamp used for every date field
pub const MOCK_TIMESTAMP: &str = "2024-01-01T09:00:00Z";

const SUBSCRIBER_UUID: u128 = 0x5f0c_2d1e_8a4b_4c3d_9e2f_1a0b_3c4d_5e6f;
const CAMPAIGN_UUID: u128 = 0x7a1b_2c3d_4e5f_4a6b_8c7d_9e0f_1a2b_3c4d;

/// Synthetic recipient
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MockSubscriber {
    pub first_name: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "UUID")]
    pub uuid: String,
    pub status: String,
}

/// Synthetic mailing list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MockList {
    pub name: String,
    /// Visibility class: `public` or `private`
    #[serde(rename = "Type")]
    pub list_type: String,
}

/// Synthetic campaign
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MockCampaign {
    pub name: String,
    pub subject: String,
    #[serde(rename = "UUID")]
    pub uuid: String,
    pub status: String,
    /// RFC 3339 send time, for `Date()` and `UnixTime()`
    pub send_at: String,
}

/// Action links
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MockLinks {
    pub manage: String,
    pub unsubscribe: String,
}

/// The full synthetic record passed to every preview render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MockContext {
    pub subscriber: MockSubscriber,
    pub lists: Vec<MockList>,
    pub campaign: MockCampaign,
    pub campaigns: Vec<MockCampaign>,
    pub links: MockLinks,
    #[serde(rename = "OptinURL")]
    pub optin_url: String,
    #[serde(rename = "UnsubURL")]
    pub unsub_url: String,
    #[serde(rename = "MessageURL")]
    pub message_url: String,
    #[serde(rename = "SiteURL")]
    pub site_url: String,
    pub token: String,
}

impl MockContext {
    /// Build the synthetic record. Deterministic: no clock, no randomness,
    /// no I/O.
    pub fn build(helpers: &Helpers) -> Self {
        let root = helpers.root_url.trim_end_matches('/').to_string();
        let subscriber_uuid = Uuid::from_u128(SUBSCRIBER_UUID).to_string();
        let campaign = MockCampaign {
            name: "Test Campaign".to_string(),
            subject: "Test Campaign".to_string(),
            uuid: Uuid::from_u128(CAMPAIGN_UUID).to_string(),
            status: "running".to_string(),
            send_at: MOCK_TIMESTAMP.to_string(),
        };

        Self {
            subscriber: MockSubscriber {
                first_name: "John".to_string(),
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                uuid: subscriber_uuid.clone(),
                status: "enabled".to_string(),
            },
            lists: vec![MockList {
                name: "Test List".to_string(),
                list_type: "public".to_string(),
            }],
            campaigns: vec![campaign.clone()],
            campaign,
            links: MockLinks {
                manage: "#".to_string(),
                unsubscribe: "#".to_string(),
            },
            optin_url: "#".to_string(),
            unsub_url: "#".to_string(),
            message_url: "#".to_string(),
            site_url: root,
            token: "test-token".to_string(),
        }
    }

    /// Serialize the record as pretty JSON, e.g. for `mailpeek render --show-context`
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
