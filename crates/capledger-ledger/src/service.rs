//! The ledger facade: one handle over the log, registries, and projection.
//!
//! [`Ledger`] owns a data directory containing the transaction journal
//! (`transactions.eqj`) and the two reference-table files. On open it
//! replays the journal to rebuild the projection; afterwards every commit
//! advances the cached projection incrementally, and [`Ledger::reconcile`]
//! cross-checks that cache against a fresh from-disk replay.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use capledger_core::{
    rules, ClassType, EntityId, EquityTransaction, ShareClass, ShareClassId, Shareholder,
    ShareholderId, ShareholderType, TransactionDraft,
};
use capledger_store::{
    parse_transaction, JournalBackendReader, ReadMode, StoreReader, TransactionLog, TxFilter,
    TypedRecord, WriteOptions,
};
use tracing::info;

use crate::errors::LedgerError;
use crate::projection::{apply, replay, Projection, ProjectionError};
use crate::reconcile;
use crate::registry::{ShareClassRegistry, ShareholderRegistry};
use crate::reports::{self, OwnershipRow, ShareClassSummary};

const JOURNAL_FILE: &str = "transactions.eqj";
const SHARE_CLASSES_FILE: &str = "share_classes.json";
const SHAREHOLDERS_FILE: &str = "shareholders.json";

/// The capitalization ledger for one issuing company.
///
/// All writes flow through [`Ledger::record_transaction`], which validates
/// against the latest projection, appends under the optimistic-concurrency
/// token captured at validation time, and only then advances the cached
/// projection. Reads never block writes; queries run against the latest
/// committed snapshot.
pub struct Ledger {
    dir: PathBuf,
    log: TransactionLog,
    classes: ShareClassRegistry,
    holders: ShareholderRegistry,
    projection: Projection,
}

impl Ledger {
    /// Opens (or initializes) the ledger rooted at `dir`.
    ///
    /// Cold start replays the full journal in canonical order to rebuild
    /// the projection; an empty directory yields an empty ledger.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, LedgerError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            LedgerError::Store(capledger_store::StoreError::Io(e))
        })?;

        let log = TransactionLog::open(dir.join(JOURNAL_FILE), WriteOptions::default())?;
        let classes = ShareClassRegistry::open(dir.join(SHARE_CLASSES_FILE))?;
        let holders = ShareholderRegistry::open(dir.join(SHAREHOLDERS_FILE))?;

        let ordered = log.list(None)?;
        let projection = replay(ordered.into_iter().map(TypedRecord::Equity))?;

        info!(
            dir = %dir.display(),
            transactions = log.len(),
            version = %projection.version(),
            "ledger opened"
        );

        Ok(Self {
            dir,
            log,
            classes,
            holders,
            projection,
        })
    }

    /// Data directory this ledger is rooted at.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The latest committed projection.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Creates a share class. The identifier is derived from the name
    /// (`class:` plus the slugged name) and must be unused.
    pub fn create_share_class(
        &mut self,
        name: &str,
        class_type: ClassType,
        authorized_shares: u64,
    ) -> Result<ShareClass, LedgerError> {
        let id = ShareClassId::parse(format!("class:{}", slug(name)))?;
        let class = ShareClass {
            id,
            name: name.to_string(),
            class_type,
            authorized_shares,
        };
        self.classes.insert(class.clone())?;
        info!(class = %class.id, authorized = authorized_shares, "share class created");
        Ok(class)
    }

    /// Creates a shareholder. The identifier is derived from the name
    /// (`holder:` plus the slugged name) and must be unused.
    pub fn create_shareholder(
        &mut self,
        name: &str,
        shareholder_type: ShareholderType,
        is_founder: bool,
        entity_id: Option<EntityId>,
    ) -> Result<Shareholder, LedgerError> {
        let id = ShareholderId::parse(format!("holder:{}", slug(name)))?;
        let holder = Shareholder {
            id,
            name: name.to_string(),
            shareholder_type,
            is_founder,
            entity_id,
        };
        self.holders.insert(holder.clone())?;
        info!(shareholder = %holder.id, "shareholder created");
        Ok(holder)
    }

    /// Amends a class's authorized ceiling.
    ///
    /// The new ceiling may not fall below the shares currently issued for
    /// the class; shrinking below issued would retroactively invalidate
    /// committed transactions.
    pub fn amend_authorized(
        &mut self,
        class_id: &ShareClassId,
        authorized_shares: u64,
    ) -> Result<ShareClass, LedgerError> {
        let mut class = self
            .classes
            .get(class_id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound {
                kind: "share class",
                id: class_id.to_string(),
            })?;

        let issued = self.projection.issued_for_class(class_id);
        if (authorized_shares as i64) < issued {
            return Err(LedgerError::AuthorizedBelowIssued {
                class: class_id.clone(),
                requested: authorized_shares,
                issued,
            });
        }

        class.authorized_shares = authorized_shares;
        self.classes.update(class.clone())?;
        info!(class = %class_id, authorized = authorized_shares, "authorized ceiling amended");
        Ok(class)
    }

    /// Validates and commits one equity transaction.
    ///
    /// The flow is read-validate-append: the latest sequence for the
    /// affected `(shareholder, share class)` key is captured before
    /// validation and handed to the store as the expected version, so a
    /// concurrent commit on the same key between validation and append is
    /// rejected as a conflict rather than silently breaking an invariant.
    /// On rejection nothing is written and the ledger state is unchanged.
    pub fn record_transaction(
        &mut self,
        draft: &TransactionDraft,
    ) -> Result<EquityTransaction, LedgerError> {
        if self.holders.get(&draft.shareholder_id).is_none() {
            return Err(LedgerError::NotFound {
                kind: "shareholder",
                id: draft.shareholder_id.to_string(),
            });
        }
        let class = self
            .classes
            .get(&draft.share_class_id)
            .ok_or_else(|| LedgerError::NotFound {
                kind: "share class",
                id: draft.share_class_id.to_string(),
            })?;

        let key = (draft.shareholder_id.clone(), draft.share_class_id.clone());
        let expected = self.log.latest_sequence(&key);

        rules::validate(
            draft,
            self.projection.holding(&key),
            self.projection.issued_for_class(&draft.share_class_id),
            class.authorized_shares,
        )?;

        let tx = self.log.append(draft, expected)?;
        self.projection = apply(&self.projection, &tx);

        info!(
            tx_id = %tx.tx_id,
            sequence = %tx.sequence,
            shareholder = %tx.shareholder_id,
            class = %tx.share_class_id,
            tx_type = tx.transaction_type.as_str(),
            shares = tx.shares,
            "transaction recorded"
        );
        Ok(tx)
    }

    /// Committed transactions in canonical replay order, optionally
    /// filtered.
    pub fn transactions(
        &self,
        filter: Option<&dyn TxFilter>,
    ) -> Result<Vec<EquityTransaction>, LedgerError> {
        Ok(self.log.list(filter)?)
    }

    /// All share classes.
    pub fn share_classes(&self) -> Vec<&ShareClass> {
        self.classes.list()
    }

    /// Looks up one share class.
    pub fn share_class(&self, id: &ShareClassId) -> Option<&ShareClass> {
        self.classes.get(id)
    }

    /// All shareholders.
    pub fn shareholders(&self) -> Vec<&Shareholder> {
        self.holders.list()
    }

    /// Looks up one shareholder.
    pub fn shareholder(&self, id: &ShareholderId) -> Option<&Shareholder> {
        self.holders.get(id)
    }

    /// Issued-vs-authorized summary for one share class.
    pub fn share_class_summary(
        &self,
        class_id: &ShareClassId,
    ) -> Result<ShareClassSummary, LedgerError> {
        let class = self
            .classes
            .get(class_id)
            .ok_or_else(|| LedgerError::NotFound {
                kind: "share class",
                id: class_id.to_string(),
            })?;
        Ok(reports::share_class_summary(&self.projection, class))
    }

    /// Ownership table across all classes.
    pub fn ownership_table(&self) -> Vec<OwnershipRow> {
        reports::ownership_table(&self.projection)
    }

    /// Holdings for one shareholder, keyed by share class.
    pub fn holdings_for(
        &self,
        shareholder_id: &ShareholderId,
    ) -> Result<BTreeMap<ShareClassId, i64>, LedgerError> {
        if self.holders.get(shareholder_id).is_none() {
            return Err(LedgerError::NotFound {
                kind: "shareholder",
                id: shareholder_id.to_string(),
            });
        }
        Ok(reports::holdings_for(&self.projection, shareholder_id))
    }

    /// Cross-checks the cached projection against a from-scratch replay of
    /// the journal as it exists on disk.
    ///
    /// Returns the number of transactions replayed on success; drift is
    /// returned as [`LedgerError::Integrity`] and is never repaired here.
    pub fn reconcile(&self) -> Result<usize, LedgerError> {
        let mut reader =
            JournalBackendReader::open(self.dir.join(JOURNAL_FILE), ReadMode::Strict)?;

        let mut txs: Vec<EquityTransaction> = Vec::new();
        while let Some(json) = reader.read_next()? {
            match parse_transaction(&json).map_err(capledger_store::StoreError::from)? {
                TypedRecord::Equity(tx) => txs.push(tx),
                TypedRecord::Unknown(json) => {
                    let record_type = json
                        .get("record_type")
                        .and_then(|v| v.as_str())
                        .unwrap_or("<missing>")
                        .to_string();
                    return Err(ProjectionError::UnknownTransactionType { record_type }.into());
                }
            }
        }
        txs.sort_by(|a, b| (a.occurred_at, a.sequence).cmp(&(b.occurred_at, b.sequence)));

        let count = txs.len();
        let replayed = replay(txs.into_iter().map(TypedRecord::Equity))?;
        reconcile::reconcile(&self.projection, &replayed)?;

        info!(transactions = count, "reconciliation clean");
        Ok(count)
    }
}

/// Lowercases a display name into the identifier charset: runs of
/// non-alphanumeric characters collapse to a single `-`, leading and
/// trailing separators are dropped.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}
