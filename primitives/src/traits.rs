//! Inter-pallet seams for the indexing-market core.
//!
//! Each trait models one of the narrow operation sets through which shared
//! state may be mutated: the provisioned-collateral ledger, the per-deployment
//! reward accumulators, and read access to allocation records. Runtime glue
//! (or a pallet's mock) supplies the implementations.

use crate::ecosystem::{Balance, DeploymentId};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use polkadot_sdk::sp_runtime::DispatchError;
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Closed set of payment types the fee-redemption entry point dispatches on.
///
/// New payment types are added as variants, each with a dedicated handler;
/// entry points reject variants they do not serve with `InvalidPaymentType`.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum PaymentTypes {
  /// Query fees collected through a receipt aggregate voucher.
  QueryFee,
  /// Per-deployment indexing fees (not served by the query-fees pallet).
  IndexingFee,
  /// Inflation rewards (minted through the allocation manager's POI path).
  IndexingRewards,
}

/// Total provisioned stake a service provider has made available.
///
/// Supplied by the host staking registry; the provision tracker never moves
/// tokens, it only bounds locks by this figure.
pub trait ProviderStake<AccountId> {
  fn provisioned_stake(owner: &AccountId) -> Balance;
}

/// The per-(owner, consumer) locked-collateral ledger.
///
/// Locks across all consumers of one owner share that owner's provisioned
/// stake as a single capacity pool.
pub trait ProvisionTracking<AccountId> {
  /// Earmark `amount` of `owner`'s provision for `consumer`.
  /// Returns the new locked total for the pair.
  fn lock(owner: &AccountId, consumer: &AccountId, amount: Balance)
    -> Result<Balance, DispatchError>;

  /// Return `amount` of the pair's locked provision to the shared pool.
  /// Returns the new locked total for the pair.
  fn release(
    owner: &AccountId,
    consumer: &AccountId,
    amount: Balance,
  ) -> Result<Balance, DispatchError>;

  /// Currently locked tokens for the pair.
  fn locked(owner: &AccountId, consumer: &AccountId) -> Balance;

  /// Capacity still available to lock across all of `owner`'s consumers.
  fn available(owner: &AccountId) -> Balance;
}

/// Per-deployment reward accrual, driven by allocation lifecycle events.
pub trait RewardsAccrual {
  /// Accrue issuance up to the current block, fold it into the deployment's
  /// accumulator, then apply the deployment's new allocated-token total.
  ///
  /// Must be called before any change to a deployment's allocated tokens so
  /// elapsed time is always priced at the pre-change size. Returns the
  /// deployment's `acc_rewards_per_allocated_token` after accrual.
  fn on_deployment_update(
    deployment: DeploymentId,
    allocated_tokens: Balance,
  ) -> Result<Balance, DispatchError>;

  /// Accrue and return the deployment's current accumulator without touching
  /// allocated-token totals.
  fn acc_rewards_per_allocated_token(deployment: DeploymentId) -> Result<Balance, DispatchError>;
}

/// Read-only view of an allocation record, for the fee-redemption path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationView<AccountId> {
  pub indexer: AccountId,
  pub deployment_id: DeploymentId,
  pub tokens: Balance,
  pub is_open: bool,
}

pub trait AllocationInspector<AccountId> {
  fn allocation(allocation_id: &AccountId) -> Option<AllocationView<AccountId>>;
}

/// Sink for the curation share of collected query fees.
///
/// Implementations transfer `amount` out of `from` into the deployment's
/// curation pool. The unit impl leaves the tokens where they are, for
/// runtimes without a curation module.
pub trait CurationDeposit<AccountId> {
  fn deposit(from: &AccountId, deployment: DeploymentId, amount: Balance)
    -> Result<(), DispatchError>;
}

impl<AccountId> CurationDeposit<AccountId> for () {
  fn deposit(
    _from: &AccountId,
    _deployment: DeploymentId,
    _amount: Balance,
  ) -> Result<(), DispatchError> {
    Ok(())
  }
}
