use super::null_as_default;
use crate::error::Result;
use crate::response::Response;
use crate::Client;
use serde::{Deserialize, Serialize};

/// A login linked to the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Login {
    pub full_name: String,
    pub id: String,
    pub picture: String,
    pub provider: String,
    pub provider_id: String,
    pub verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentProviderId {
    #[serde(rename = "Paypal")]
    pub paypal: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSubscriptionId {
    #[serde(rename = "Paypal")]
    pub paypal: String,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub client: String,
    pub dropbox_connected: bool,
    pub email: String,
    pub evernote_connected: bool,
    pub facebook_connected: bool,
    pub family_name: String,
    pub full_name: String,
    pub gender: String,
    pub given_name: String,
    pub google: String,
    /// User id, the `{userId}` of category and tag ids.
    pub id: String,
    pub locale: String,
    #[serde(deserialize_with = "null_as_default")]
    pub logins: Vec<Login>,
    pub payment_provider_id: Option<PaymentProviderId>,
    pub payment_subscription_id: Option<PaymentSubscriptionId>,
    pub picture: String,
    pub pocket_connected: bool,
    pub product: String,
    pub product_expiration: i64,
    pub subscription_payment_provider: String,
    pub subscription_status: String,
    pub twitter_connected: bool,
    pub upgrade_date: i64,
    pub wave: String,
    pub windows_live_connected: bool,
    pub word_press_connected: bool,
}

/// Profile endpoints.
pub struct Profiles<'a> {
    client: &'a Client,
}

impl<'a> Profiles<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Get the profile of the user the access token belongs to.
    pub async fn get(&self) -> Result<Response<Profile>> {
        self.client.get("profile").await
    }
}
