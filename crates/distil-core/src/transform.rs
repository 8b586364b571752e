use distil_db::{Database, Session};
use serde_json::Value;
use tracing::warn;

use crate::error::Error;

/// Contract of one refinement: given a validated-on-entry raw document and a
/// transactional session, fully populate the session's pending writes or
/// error with nothing worth keeping. Transaction boundaries belong to the
/// caller of [`Transform::transform`]; [`Transform::process`] is the owning
/// wrapper for the common case.
pub trait Transform {
    fn transform(&mut self, session: &Session<'_>, doc: &Value) -> Result<(), Error>;

    /// Open a session, run the transform, commit on success and roll back on
    /// any error. Never leaves a partial chat behind.
    fn process(&mut self, db: &mut Database, doc: &Value) -> Result<(), Error> {
        let session = db.session().map_err(Error::from)?;
        match self.transform(&session, doc) {
            Ok(()) => {
                session.commit()?;
                Ok(())
            }
            Err(e) => {
                if let Err(rb) = session.rollback() {
                    warn!("rollback after failed transform also failed: {rb}");
                }
                Err(e)
            }
        }
    }
}
