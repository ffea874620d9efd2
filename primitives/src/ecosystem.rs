//! Ecosystem Constants for the Indexing Market
//!
//! This module centralizes all system-level constants: pallet IDs for deriving
//! pallet-owned accounts, and the fundamental economic parameters shared by the
//! allocation, rewards, and fee-redemption pallets.
//!
//! These constants are the single source of truth for system architecture and are
//! re-used across all runtime configurations via the primitives crate.

/// Balance type alias for consistency across the ecosystem
pub type Balance = u128;

/// Identifier of a subgraph deployment (a content hash, opaque to the core).
pub type DeploymentId = [u8; 32];

/// A proof of indexing digest presented against an open allocation.
pub type Poi = [u8; 32];

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// These IDs are used by Polkadot SDK's `PalletId::into_account_truncating()`
/// to deterministically generate accounts for pallet-specific operations.
pub mod pallet_ids {
  /// Allocation Manager pallet ID (allocation lifecycle state machine)
  pub const ALLOCATION_MANAGER_PALLET_ID: &[u8; 8] = b"alocmgr0";

  /// Provision Tracker pallet ID (per owner/consumer collateral ledger)
  pub const PROVISION_TRACKER_PALLET_ID: &[u8; 8] = b"provtrk0";

  /// Rewards pallet ID (exponential issuance accrual)
  pub const REWARDS_PALLET_ID: &[u8; 8] = b"rewards0";

  /// Query Fees pallet ID (RAV redemption and rebate pools)
  pub const QUERY_FEES_PALLET_ID: &[u8; 8] = b"qryfees0";
}

/// Ecosystem parameters defining mathematical constants and thresholds.
///
/// These parameters are global across all pallets and coordinate the
/// economic properties of the system.
pub mod params {
  use super::Balance;
  use sp_arithmetic::Permill;

  /// The single global fixed-point scaling factor (10^18).
  ///
  /// All fractional quantities (issuance rates, reward accumulators, rebate
  /// exponents) are integers scaled by this factor.
  pub const FIXED_POINT_SCALE: Balance = 1_000_000_000_000_000_000;

  /// Issuance rates at or below this value are treated as "no growth".
  ///
  /// The stored rate carries an implicit "+1" baseline: `FIXED_POINT_SCALE`
  /// means the issuance base is multiplied by exactly 1 per block.
  pub const MIN_ISSUANCE_RATE: Balance = FIXED_POINT_SCALE;

  /// Default share of collected query fees routed to the deployment's
  /// curation pool (10%).
  pub const DEFAULT_CURATION_CUT: Permill = Permill::from_percent(10);

  /// Default protocol tax burned from every fee collection (1%).
  pub const DEFAULT_PROTOCOL_TAX: Permill = Permill::from_percent(1);

  /// Default share of minted indexing rewards routed to the indexer's
  /// delegation pool (10%).
  pub const DEFAULT_DELEGATION_CUT: Permill = Permill::from_percent(10);

  /// Default exponential-rebate alpha ratio (0.77).
  pub const DEFAULT_ALPHA_NUMERATOR: u32 = 77;
  pub const DEFAULT_ALPHA_DENOMINATOR: u32 = 100;

  /// Default exponential-rebate lambda ratio (0.6).
  pub const DEFAULT_LAMBDA_NUMERATOR: u32 = 60;
  pub const DEFAULT_LAMBDA_DENOMINATOR: u32 = 100;

  /// Default multiple of collected fees locked as slashable stake.
  pub const DEFAULT_STAKE_TO_FEES_RATIO: Balance = 2;

  /// Maximum allowed gap between proofs of indexing before the elapsed
  /// window's rewards are forfeited (~7 days at 6s blocks).
  pub const MAX_POI_STALENESS_BLOCKS: u32 = 100_800;

  /// Blocks a stake claim stays locked after a fee collection (~7 days).
  pub const DISPUTE_PERIOD_BLOCKS: u32 = 100_800;

  /// Bound on the pending stake-claim FIFO per indexer.
  pub const MAX_PENDING_STAKE_CLAIMS: u32 = 256;
}
