mod stock;
pub use self::stock::PriceSnapshot;

mod events;
pub use self::events::{EventRecord, EventsSnapshot};

mod summary;
pub use self::summary::SummaryResponse;

mod lead;
pub use self::lead::{LeadRequest, LeadResponse};

use serde::{Deserialize, Deserializer};

/// The backend emits `null` for fields its scraper could not find.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
