//! NFT gallery selection.
//!
//! Upstream ownership lists are truncated to a fixed cap, in upstream order,
//! and each entry's display name and image are resolved through an ordered
//! list of candidates. The first non-empty candidate wins; candidates are
//! never inspected for validity beyond emptiness.

use super::asset::CollectibleAsset;

/// Maximum number of collectibles kept in a summary.
pub const COLLECTIBLE_CAP: usize = 12;

/// Image used when neither the collection image nor its banner is set.
pub const PLACEHOLDER_IMAGE: &str = "https://static.alchemyapi.io/images/assets/unknown.png";

/// One NFT as reported by the ownership source, before selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedCollectible {
    pub contract: String,
    pub token_id: String,
    pub collection_name: Option<String>,
    pub contract_name: Option<String>,
    pub contract_symbol: Option<String>,
    pub collection_image: Option<String>,
    pub banner_image: Option<String>,
}

/// First candidate that is present and non-empty.
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates.into_iter().flatten().find(|c| !c.is_empty())
}

impl OwnedCollectible {
    /// Display name: collection name, contract name, `"{symbol} #{id}"`, `"#{id}"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let symbol_label = self
            .contract_symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|symbol| format!("{symbol} #{}", self.token_id));
        let id_label = format!("#{}", self.token_id);

        first_non_empty([
            self.collection_name.as_deref(),
            self.contract_name.as_deref(),
            symbol_label.as_deref(),
            Some(id_label.as_str()),
        ])
        .unwrap_or(id_label.as_str())
        .to_string()
    }

    /// Image: collection image, banner image, placeholder.
    #[must_use]
    pub fn display_image(&self) -> String {
        first_non_empty([
            self.collection_image.as_deref(),
            self.banner_image.as_deref(),
            Some(PLACEHOLDER_IMAGE),
        ])
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
    }
}

impl From<&OwnedCollectible> for CollectibleAsset {
    fn from(owned: &OwnedCollectible) -> Self {
        Self {
            name: owned.display_name(),
            image: owned.display_image(),
            contract: owned.contract.clone(),
            token_id: owned.token_id.clone(),
        }
    }
}

/// Keep the first `cap` entries in upstream order and resolve their display fields.
#[must_use]
pub fn select_collectibles(owned: &[OwnedCollectible], cap: usize) -> Vec<CollectibleAsset> {
    owned.iter().take(cap).map(CollectibleAsset::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(token_id: &str) -> OwnedCollectible {
        OwnedCollectible {
            contract: "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d".into(),
            token_id: token_id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn first_non_empty_skips_none_and_empty() {
        assert_eq!(first_non_empty([None, Some(""), Some("b"), Some("c")]), Some("b"));
        assert_eq!(first_non_empty([None, Some("")]), None);
    }

    #[test]
    fn name_prefers_collection_name() {
        let nft = OwnedCollectible {
            collection_name: Some("Bored Ape Yacht Club".into()),
            contract_name: Some("BoredApeYachtClub".into()),
            ..owned("1")
        };
        assert_eq!(nft.display_name(), "Bored Ape Yacht Club");
    }

    #[test]
    fn empty_collection_name_falls_to_contract_name() {
        let nft = OwnedCollectible {
            collection_name: Some(String::new()),
            contract_name: Some("BoredApeYachtClub".into()),
            contract_symbol: Some("BAYC".into()),
            ..owned("1")
        };
        assert_eq!(nft.display_name(), "BoredApeYachtClub");
    }

    #[test]
    fn name_falls_to_symbol_and_token_id() {
        let nft = OwnedCollectible {
            contract_symbol: Some("BAYC".into()),
            ..owned("42")
        };
        assert_eq!(nft.display_name(), "BAYC #42");
    }

    #[test]
    fn name_falls_to_bare_token_id() {
        let nft = OwnedCollectible {
            contract_symbol: Some(String::new()),
            ..owned("42")
        };
        assert_eq!(nft.display_name(), "#42");
    }

    #[test]
    fn image_fallback_order() {
        let both = OwnedCollectible {
            collection_image: Some("https://img/a.png".into()),
            banner_image: Some("https://img/banner.png".into()),
            ..owned("1")
        };
        assert_eq!(both.display_image(), "https://img/a.png");

        let banner_only = OwnedCollectible {
            collection_image: Some(String::new()),
            banner_image: Some("https://img/banner.png".into()),
            ..owned("1")
        };
        assert_eq!(banner_only.display_image(), "https://img/banner.png");

        assert_eq!(owned("1").display_image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn broken_but_non_empty_image_is_kept() {
        let nft = OwnedCollectible {
            collection_image: Some("not a uri".into()),
            banner_image: Some("https://img/banner.png".into()),
            ..owned("1")
        };
        assert_eq!(nft.display_image(), "not a uri");
    }

    #[test]
    fn selection_caps_and_preserves_order() {
        let list: Vec<_> = (0..30).map(|i| owned(&i.to_string())).collect();
        let selected = select_collectibles(&list, COLLECTIBLE_CAP);

        assert_eq!(selected.len(), COLLECTIBLE_CAP);
        let ids: Vec<_> = selected.iter().map(|c| c.token_id.as_str()).collect();
        let expected: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn selection_of_short_list_keeps_everything() {
        let list = vec![owned("9"), owned("3")];
        let selected = select_collectibles(&list, COLLECTIBLE_CAP);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].token_id, "9");
        assert_eq!(selected[0].contract, list[0].contract);
    }
}
