use crate::profile::{LearningStyle, ProfileStore, ProfileStoreError};

const STYLE_KEY: &[u8] = b"profile:style";

/// Sled-backed persistence for the learner's style preference.
#[derive(Debug)]
pub struct PreferenceStore {
    db: sled::Db,
}

impl PreferenceStore {
    pub fn open(path: &str) -> Result<Self, ProfileStoreError> {
        let db = sled::open(path).map_err(|e| ProfileStoreError(e.to_string()))?;
        Ok(Self { db })
    }

    pub fn flush(&self) -> Result<(), ProfileStoreError> {
        self.db
            .flush()
            .map(|_| ())
            .map_err(|e| ProfileStoreError(e.to_string()))
    }
}

impl ProfileStore for PreferenceStore {
    fn load(&self) -> LearningStyle {
        match self.db.get(STYLE_KEY) {
            Ok(Some(raw)) => match std::str::from_utf8(&raw)
                .ok()
                .and_then(|s| s.parse::<LearningStyle>().ok())
            {
                Some(style) => style,
                None => {
                    tracing::warn!("Stored style preference is undecodable, using default");
                    LearningStyle::default()
                }
            },
            Ok(None) => LearningStyle::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read style preference, using default");
                LearningStyle::default()
            }
        }
    }

    fn save(&self, style: LearningStyle) -> Result<(), ProfileStoreError> {
        self.db
            .insert(STYLE_KEY, style.as_str().as_bytes())
            .map_err(|e| ProfileStoreError(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| ProfileStoreError(e.to_string()))?;
        Ok(())
    }
}
