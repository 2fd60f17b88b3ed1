// src/features/account.rs
//
// Metadata-derived flags: account age, machine-minted username shapes,
// affiliate badge pass-through, emoji in the display name.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{FeatureVector, PostMetadata};

const NEW_ACCOUNT_DAYS: f64 = 90.0;

/// Username shapes common to bulk-registered accounts.
fn username_res() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"^[A-Z][a-z]+[A-Z][a-z]+\d+$", // CamelCase words + digit run
            r"^\w+_\w+\d+$",                // word_word + digits
            r"\d{8,}$",                     // long digit suffix
            r"^[A-Za-z]+\d{4,7}$",          // letters + medium digit suffix
            r"^[a-z]+\d{1,3}$",             // lowercase + 1-3 digits
        ]
        .iter()
        .map(|src| Regex::new(src).unwrap())
        .collect()
    })
}

pub(crate) fn apply(f: &mut FeatureVector, metadata: &PostMetadata) {
    f.is_new_account = metadata
        .account_age_days
        .map(|age| age < NEW_ACCOUNT_DAYS)
        .unwrap_or(false);

    if let Some(username) = metadata.username.as_deref() {
        let handle = username.trim().trim_start_matches('@');
        f.has_suspicious_username =
            !handle.is_empty() && username_res().iter().any(|re| re.is_match(handle));
    }

    f.has_affiliate_badge = metadata.has_affiliate_badge.unwrap_or(false);

    if let Some(name) = metadata.display_name.as_deref() {
        f.emoji_in_display_name = name.chars().any(crate::text::is_emoji);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta_with_username(u: &str) -> PostMetadata {
        PostMetadata {
            username: Some(u.to_string()),
            ..Default::default()
        }
    }

    fn suspicious(u: &str) -> bool {
        let mut f = FeatureVector::default();
        apply(&mut f, &meta_with_username(u));
        f.has_suspicious_username
    }

    #[test]
    fn minted_username_shapes() {
        assert!(suspicious("SarahJones84731"));
        assert!(suspicious("crypto_bull2024"));
        assert!(suspicious("user92837465"));
        assert!(suspicious("@Mark28471"));
        assert!(suspicious("jake7"));
    }

    #[test]
    fn ordinary_usernames_pass() {
        assert!(!suspicious("graphophile"));
        assert!(!suspicious("sarah_jones"));
        assert!(!suspicious(""));
    }

    #[test]
    fn age_flag_only_when_provided() {
        let mut f = FeatureVector::default();
        apply(&mut f, &PostMetadata::default());
        assert!(!f.is_new_account);

        let mut f = FeatureVector::default();
        apply(
            &mut f,
            &PostMetadata {
                account_age_days: Some(12.0),
                ..Default::default()
            },
        );
        assert!(f.is_new_account);
    }

    #[test]
    fn display_name_emoji() {
        let mut f = FeatureVector::default();
        apply(
            &mut f,
            &PostMetadata {
                display_name: Some("Laser Eyes 🚀".to_string()),
                ..Default::default()
            },
        );
        assert!(f.emoji_in_display_name);
    }
}
