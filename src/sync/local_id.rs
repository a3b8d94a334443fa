//! Temporary ids for records that only exist locally.

use crate::model::RecordId;
use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;

const PREFIX: &str = "local-";
const SUFFIX_LEN: usize = 6;

/// Mints `local-<millis>-<suffix>` ids, retrying until `taken` rejects none.
pub fn generate(taken: impl Fn(&RecordId) -> bool) -> RecordId {
    let mut rng = rand::rng();
    loop {
        let suffix: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        let id = RecordId(format!(
            "{PREFIX}{}-{suffix}",
            Utc::now().timestamp_millis()
        ));
        if !taken(&id) {
            return id;
        }
    }
}

/// True for ids minted by [`generate`].
pub fn is_local(id: &RecordId) -> bool {
    id.as_str().starts_with(PREFIX)
}
