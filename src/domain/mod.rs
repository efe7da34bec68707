//! Chain-agnostic domain types: subjects, priced assets, summaries, history.

pub mod asset;
pub mod collectible;
pub mod error;
pub mod history;
pub mod holding;
pub mod money;
pub mod subject;
pub mod summary;

pub use asset::{CollectibleAsset, FungibleAsset, NativeAsset};
pub use collectible::{select_collectibles, OwnedCollectible, COLLECTIBLE_CAP, PLACEHOLDER_IMAGE};
pub use history::{HistoryEntry, HISTORY_LIMIT};
pub use holding::{AllowList, TokenHolding, NATIVE_SYMBOL, TRACKED_SYMBOLS};
pub use money::{PriceTable, NATIVE_DECIMALS};
pub use subject::Subject;
pub use summary::AssetSummary;
