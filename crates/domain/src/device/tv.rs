//! TV — streaming apps, broadcast channels, and the exclusivity rule
//! between them.

use serde::{Deserialize, Serialize};

use crate::error::UpdateError;
use crate::fields::{self, FieldMap};

/// Streaming apps installed on every TV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TvApp {
    Netflix,
    PrimeVideo,
    DisneyPlus,
    Youtube,
    Twitch,
}

impl TvApp {
    pub const ALL: [Self; 5] = [
        Self::Netflix,
        Self::PrimeVideo,
        Self::DisneyPlus,
        Self::Youtube,
        Self::Twitch,
    ];

    /// Resolve an app by case-insensitive name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|app| app.as_str().eq_ignore_ascii_case(name.trim()))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Netflix => "netflix",
            Self::PrimeVideo => "primevideo",
            Self::DisneyPlus => "disneyplus",
            Self::Youtube => "youtube",
            Self::Twitch => "twitch",
        }
    }
}

/// Broadcast channels every TV can tune into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TvChannel {
    News,
    Sports,
    Movies,
    Music,
    Kids,
}

impl TvChannel {
    pub const ALL: [Self; 5] = [
        Self::News,
        Self::Sports,
        Self::Movies,
        Self::Music,
        Self::Kids,
    ];

    /// Resolve a channel by case-insensitive name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.as_str().eq_ignore_ascii_case(name.trim()))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Sports => "sports",
            Self::Movies => "movies",
            Self::Music => "music",
            Self::Kids => "kids",
        }
    }
}

/// Kind-specific state of a TV.
///
/// Invariant: at most one of `current_app`/`current_channel` is present at
/// any time. Selecting one clears the other; supplying both non-empty in a
/// single update is rejected before anything is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tv {
    pub current_app: Option<TvApp>,
    pub current_channel: Option<TvChannel>,
    /// Volume, always within `[0, 100]`.
    pub volume: u8,
}

impl Default for Tv {
    fn default() -> Self {
        Self {
            current_app: None,
            current_channel: Some(TvChannel::News),
            volume: 50,
        }
    }
}

impl Tv {
    pub(crate) const EXPECTED_FIELDS: &'static [&'static str] =
        &["powered_on", "volume", "current_app", "current_channel"];

    /// Switch to an app, leaving the channel.
    pub fn set_app(&mut self, app: TvApp) {
        self.current_app = Some(app);
        self.current_channel = None;
    }

    /// Tune into a channel, closing the app.
    pub fn set_channel(&mut self, channel: TvChannel) {
        self.current_channel = Some(channel);
        self.current_app = None;
    }

    /// Set the volume, clamping into `[0, 100]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_volume(&mut self, value: i64) {
        self.volume = value.clamp(0, 100) as u8;
    }

    /// Reject updates carrying both a non-empty app and a non-empty channel.
    ///
    /// Runs before any field of the call is applied, so a rejected call
    /// leaves the TV untouched, power bit included.
    pub(crate) fn check_exclusive(body: &FieldMap) -> Result<(), UpdateError> {
        let has_app = body
            .get("current_app")
            .is_some_and(|value| fields::non_empty_str(value).is_some());
        let has_channel = body
            .get("current_channel")
            .is_some_and(|value| fields::non_empty_str(value).is_some());

        if has_app && has_channel {
            return Err(UpdateError::MutuallyExclusiveFields);
        }
        Ok(())
    }

    pub(crate) fn apply_fields(&mut self, body: &FieldMap) -> Result<bool, UpdateError> {
        let mut recognized = false;

        if let Some(name) = Self::selection(body, "current_app")? {
            let app = TvApp::from_name(name).ok_or_else(|| UpdateError::InvalidFieldValue {
                field: "current_app",
                value: name.to_string(),
            })?;
            self.set_app(app);
            recognized = true;
        }

        if let Some(name) = Self::selection(body, "current_channel")? {
            let channel =
                TvChannel::from_name(name).ok_or_else(|| UpdateError::InvalidFieldValue {
                    field: "current_channel",
                    value: name.to_string(),
                })?;
            self.set_channel(channel);
            recognized = true;
        }

        if let Some(value) = body.get("volume") {
            if !value.is_null() {
                self.set_volume(fields::parse_i64("volume", value)?);
                recognized = true;
            }
        }

        Ok(recognized)
    }

    /// The requested app/channel name, with empty and null values treated
    /// as "no selection" rather than an error.
    fn selection<'a>(
        body: &'a FieldMap,
        field: &'static str,
    ) -> Result<Option<&'a str>, UpdateError> {
        match body.get(field) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value @ serde_json::Value::String(_)) => Ok(fields::non_empty_str(value)),
            Some(value) => Err(fields::invalid(field, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn update(value: serde_json::Value) -> FieldMap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn should_default_to_news_channel_at_half_volume() {
        let tv = Tv::default();
        assert_eq!(tv.current_channel, Some(TvChannel::News));
        assert_eq!(tv.current_app, None);
        assert_eq!(tv.volume, 50);
    }

    #[test]
    fn should_clear_channel_when_app_is_selected() {
        let mut tv = Tv::default();

        tv.apply_fields(&update(json!({"current_app": "Netflix"}))).unwrap();

        assert_eq!(tv.current_app, Some(TvApp::Netflix));
        assert_eq!(tv.current_channel, None);
    }

    #[test]
    fn should_clear_app_when_channel_is_selected() {
        let mut tv = Tv::default();
        tv.set_app(TvApp::Twitch);

        tv.apply_fields(&update(json!({"current_channel": "sports"}))).unwrap();

        assert_eq!(tv.current_channel, Some(TvChannel::Sports));
        assert_eq!(tv.current_app, None);
    }

    #[test]
    fn should_reject_app_and_channel_in_same_call() {
        let body = update(json!({"current_app": "netflix", "current_channel": "news"}));

        let err = Tv::check_exclusive(&body).unwrap_err();

        assert_eq!(err, UpdateError::MutuallyExclusiveFields);
    }

    #[test]
    fn should_allow_one_side_when_the_other_is_blank() {
        let body = update(json!({"current_app": "", "current_channel": "movies"}));

        Tv::check_exclusive(&body).unwrap();

        let mut tv = Tv::default();
        let recognized = tv.apply_fields(&body).unwrap();
        assert!(recognized);
        assert_eq!(tv.current_channel, Some(TvChannel::Movies));
    }

    #[test]
    fn should_not_count_blank_selection_as_recognized() {
        let mut tv = Tv::default();

        let recognized = tv.apply_fields(&update(json!({"current_app": ""}))).unwrap();

        assert!(!recognized);
        assert_eq!(tv.current_channel, Some(TvChannel::News));
    }

    #[test]
    fn should_reject_unknown_app_name() {
        let mut tv = Tv::default();
        let before = tv.clone();

        let err = tv
            .apply_fields(&update(json!({"current_app": "blockbuster"})))
            .unwrap_err();

        assert!(matches!(err, UpdateError::InvalidFieldValue { field, .. } if field == "current_app"));
        assert_eq!(tv, before);
    }

    #[test]
    fn should_reject_non_string_selection() {
        let mut tv = Tv::default();

        let result = tv.apply_fields(&update(json!({"current_channel": 4})));

        assert!(result.is_err());
    }

    #[test]
    fn should_clamp_volume_into_range() {
        let mut tv = Tv::default();

        tv.apply_fields(&update(json!({"volume": 130}))).unwrap();
        assert_eq!(tv.volume, 100);

        tv.apply_fields(&update(json!({"volume": -10}))).unwrap();
        assert_eq!(tv.volume, 0);
    }
}
