use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A distribution medium a campaign runs on.
///
/// The label returned by [`ChannelType::as_str`] is what lands in the
/// `channels.channel_type` column, so it must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChannelType {
    Email,
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[serde(rename = "Paid Ads")]
    PaidAds,
}

impl ChannelType {
    pub const ALL: [ChannelType; 3] = [ChannelType::Email, ChannelType::SocialMedia, ChannelType::PaidAds];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelType::Email => "Email",
            ChannelType::SocialMedia => "Social Media",
            ChannelType::PaidAds => "Paid Ads",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelType {
    type Err = CoreError;

    /// Accepts the stored label as well as the dashed/underscored forms used
    /// on the command line (`social-media`, `paid_ads`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "email" => Ok(ChannelType::Email),
            "socialmedia" => Ok(ChannelType::SocialMedia),
            "paidads" => Ok(ChannelType::PaidAds),
            _ => Err(CoreError::UnknownChannel(s.to_string())),
        }
    }
}
