use super::record::CombinedRecord;
use super::record::GtoRecord;
use super::record::Kind;
use crate::error::Error;
use chrono::DateTime;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

/// Append-only result store: one JSON artifact per record, keyed by
/// {kind, hand id, timestamp, uuid}. Nothing here ever overwrites or
/// deletes; re-analysis of a hand just appends another artifact, and
/// readers resolve "latest" from the timestamps inside the documents,
/// never from directory order. The uuid suffix keeps keys collision-free
/// across rapid repeated saves and concurrent runs.
pub struct Results(PathBuf);

impl From<PathBuf> for Results {
    fn from(root: PathBuf) -> Self {
        Self(root)
    }
}

impl Results {
    pub fn save_gto(&self, record: &GtoRecord) -> Result<PathBuf, Error> {
        self.save(
            Kind::GtoOnly,
            &record.hand.hand_id,
            record.processed_at,
            record,
        )
    }

    pub fn save_combined(&self, record: &CombinedRecord) -> Result<PathBuf, Error> {
        self.save(
            Kind::Combined,
            &record.gto.hand.hand_id,
            record.ai_processed_at,
            record,
        )
    }

    /// Every gto-only record, keyed, ordered by (processed_at, key).
    pub fn load_gto(&self) -> Result<Vec<(String, GtoRecord)>, Error> {
        let mut records = self.load::<GtoRecord>(Kind::GtoOnly)?;
        records.sort_by(|(ka, a), (kb, b)| a.processed_at.cmp(&b.processed_at).then(ka.cmp(kb)));
        Ok(records)
    }

    /// Every combined record, keyed, ordered by (ai_processed_at, key).
    pub fn load_combined(&self) -> Result<Vec<(String, CombinedRecord)>, Error> {
        let mut records = self.load::<CombinedRecord>(Kind::Combined)?;
        records
            .sort_by(|(ka, a), (kb, b)| a.ai_processed_at.cmp(&b.ai_processed_at).then(ka.cmp(kb)));
        Ok(records)
    }

    /// The authoritative gto record per hand: one record per hand id,
    /// the most recent by (processed_at, key).
    pub fn latest_gto(&self) -> Result<Vec<GtoRecord>, Error> {
        let mut latest = std::collections::BTreeMap::new();
        for (key, record) in self.load_gto()? {
            latest.insert(record.hand.hand_id.clone(), (key, record));
        }
        Ok(latest.into_values().map(|(_, record)| record).collect())
    }

    /// The most recent gto record for one hand, if any.
    pub fn latest(&self, hand_id: &str) -> Result<Option<GtoRecord>, Error> {
        Ok(self
            .load_gto()?
            .into_iter()
            .filter(|(_, record)| record.hand.hand_id == hand_id)
            .map(|(_, record)| record)
            .next_back())
    }

    /// Write-to-temp then rename, so a crash mid-write never leaves a
    /// half-formed artifact visible to readers.
    fn save<T: Serialize>(
        &self,
        kind: Kind,
        hand_id: &str,
        stamp: DateTime<Utc>,
        record: &T,
    ) -> Result<PathBuf, Error> {
        std::fs::create_dir_all(&self.0)?;
        let key = format!(
            "{}_{}_{}_{}.json",
            kind.prefix(),
            sanitize(hand_id),
            stamp.format("%Y%m%dT%H%M%S%3f"),
            uuid::Uuid::now_v7().simple(),
        );
        let path = self.0.join(&key);
        let temp = self.0.join(format!("{}.tmp", key));
        std::fs::write(&temp, serde_json::to_vec_pretty(record)?)?;
        std::fs::rename(&temp, &path)?;
        Ok(path)
    }

    /// Artifacts that fail to parse are warned about and skipped; one
    /// corrupt file never poisons a whole listing.
    fn load<T: DeserializeOwned>(&self, kind: Kind) -> Result<Vec<(String, T)>, Error> {
        let mut records = Vec::new();
        if !self.0.exists() {
            return Ok(records);
        }
        for entry in std::fs::read_dir(&self.0)? {
            let path = entry?.path();
            let key = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            if !key.starts_with(&format!("{}_", kind.prefix())) || !key.ends_with(".json") {
                continue;
            }
            match std::fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|text| serde_json::from_str::<T>(&text).map_err(Error::from))
            {
                Ok(record) => records.push((key, record)),
                Err(e) => log::warn!("skipping unreadable artifact {}: {}", key, e),
            }
        }
        Ok(records)
    }
}

fn sanitize(hand_id: &str) -> String {
    hand_id
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}
