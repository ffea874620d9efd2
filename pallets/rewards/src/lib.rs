//! Rewards Pallet
//!
//! Exponential inflation accrual with per-deployment accumulators. Elapsed
//! blocks compound an issuance base by a fixed-point rate; the resulting
//! rewards are spread per allocated token and snapshotted into deployment
//! accumulators on every allocation lifecycle event.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

#[frame::pallet]
pub mod pallet {
  use super::WeightInfo;
  use frame::deps::sp_runtime::{traits::SaturatedConversion, DispatchError};
  use frame::prelude::*;
  use primitives::{fixed_math, params::FIXED_POINT_SCALE, Balance, DeploymentId, RewardsAccrual};

  /// Configuration trait for the rewards pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Origin that can change issuance parameters
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Rates at or below this value are treated as "no growth configured".
    ///
    /// The stored rate carries an implicit "+1" baseline: a value equal to
    /// the global scale multiplies the base by exactly 1 per block.
    #[pallet::constant]
    type MinIssuanceRate: Get<Balance>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;
  }

  /// The pallet struct
  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Accrual state for one subgraph deployment.
  #[derive(
    Clone, Debug, Decode, DecodeWithMemTracking, Default, Encode, Eq, PartialEq, TypeInfo,
    MaxEncodedLen,
  )]
  pub struct DeploymentAccumulator {
    /// Rewards per allocated token accumulated for this deployment.
    pub acc_rewards_per_allocated_token: Balance,
    /// Value of the global per-token accumulator at the last fold.
    pub acc_rewards_per_token_snapshot: Balance,
    /// Tokens currently allocated to this deployment.
    pub allocated_tokens: Balance,
  }

  /// Principal the exponential issuance compounds from.
  #[pallet::storage]
  #[pallet::getter(fn issuance_base)]
  pub type IssuanceBase<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Fixed-point per-block growth factor, baseline included.
  #[pallet::storage]
  #[pallet::getter(fn issuance_rate)]
  pub type IssuanceRate<T: Config> = StorageValue<_, Balance, ValueQuery, T::MinIssuanceRate>;

  /// Block of the last issuance snapshot.
  #[pallet::storage]
  #[pallet::getter(fn last_rewards_update_block)]
  pub type LastRewardsUpdateBlock<T: Config> = StorageValue<_, BlockNumberFor<T>, ValueQuery>;

  /// Lifetime rewards accrued across all deployments.
  #[pallet::storage]
  #[pallet::getter(fn accumulated_rewards)]
  pub type AccumulatedRewards<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Global rewards-per-allocated-token accumulator (scale-denominated).
  #[pallet::storage]
  #[pallet::getter(fn acc_rewards_per_token)]
  pub type AccRewardsPerToken<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Tokens allocated across all deployments.
  #[pallet::storage]
  #[pallet::getter(fn total_tokens_allocated)]
  pub type TotalTokensAllocated<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Per-deployment accumulators.
  #[pallet::storage]
  #[pallet::getter(fn deployment_rewards)]
  pub type DeploymentRewards<T: Config> =
    StorageMap<_, Blake2_128Concat, DeploymentId, DeploymentAccumulator, ValueQuery>;

  /// Events for the rewards pallet
  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Issuance rate updated (after a snapshot of elapsed time).
    IssuanceRateSet { old_rate: Balance, new_rate: Balance },
    /// Issuance base updated (after a snapshot of elapsed time).
    IssuanceBaseSet { old_base: Balance, new_base: Balance },
  }

  /// Errors for the rewards pallet
  #[pallet::error]
  pub enum Error<T> {
    /// The rate would shrink the base below its baseline.
    InvalidIssuanceRate,
    /// Arithmetic overflow occurred
    ArithmeticOverflow,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Update the per-block issuance rate (governance only).
    ///
    /// Accrues at the old rate first so already-elapsed blocks are never
    /// repriced.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::set_issuance_rate())]
    pub fn set_issuance_rate(origin: OriginFor<T>, new_rate: Balance) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(new_rate >= FIXED_POINT_SCALE, Error::<T>::InvalidIssuanceRate);
      Self::take_rewards_snapshot()?;
      let old_rate = IssuanceRate::<T>::get();
      IssuanceRate::<T>::put(new_rate);
      Self::deposit_event(Event::IssuanceRateSet { old_rate, new_rate });
      Ok(())
    }

    /// Update the issuance base (governance only).
    ///
    /// Accrues under the old base first for the same reason as above.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_issuance_base())]
    pub fn set_issuance_base(origin: OriginFor<T>, new_base: Balance) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::take_rewards_snapshot()?;
      let old_base = IssuanceBase::<T>::get();
      IssuanceBase::<T>::put(new_base);
      Self::deposit_event(Event::IssuanceBaseSet { old_base, new_base });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Rewards accrued since the last snapshot, at the current block.
    ///
    /// Zero when the rate is at or below the configured minimum, when no
    /// blocks have elapsed, or when the base is unset.
    pub fn new_rewards() -> Result<Balance, DispatchError> {
      let rate = IssuanceRate::<T>::get();
      if rate <= T::MinIssuanceRate::get() {
        return Ok(0);
      }
      let base = IssuanceBase::<T>::get();
      if base == 0 {
        return Ok(0);
      }
      let now = frame_system::Pallet::<T>::block_number();
      let last = LastRewardsUpdateBlock::<T>::get();
      if now <= last {
        return Ok(0);
      }
      let elapsed: u64 = (now - last).saturated_into();

      let growth = fixed_math::pow_fixed(rate, elapsed).ok_or(Error::<T>::ArithmeticOverflow)?;
      let grown = fixed_math::mul_div(base, growth, FIXED_POINT_SCALE)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      Ok(grown.saturating_sub(base))
    }

    /// Freeze accrued rewards at the current block and advance the cursor.
    ///
    /// Compounds the base so subsequent accrual continues from the new total.
    /// A window with zero allocated tokens is dropped: the cursor advances
    /// and nothing is minted or attributed.
    pub fn take_rewards_snapshot() -> Result<Balance, DispatchError> {
      let new_rewards = Self::new_rewards()?;
      let total_allocated = TotalTokensAllocated::<T>::get();

      if new_rewards > 0 && total_allocated > 0 {
        let per_token = fixed_math::mul_div(new_rewards, FIXED_POINT_SCALE, total_allocated)
          .ok_or(Error::<T>::ArithmeticOverflow)?;
        AccRewardsPerToken::<T>::mutate(|acc| *acc = acc.saturating_add(per_token));
        AccumulatedRewards::<T>::mutate(|acc| *acc = acc.saturating_add(new_rewards));
        IssuanceBase::<T>::mutate(|base| *base = base.saturating_add(new_rewards));
      }
      LastRewardsUpdateBlock::<T>::put(frame_system::Pallet::<T>::block_number());

      if total_allocated > 0 {
        Ok(new_rewards)
      } else {
        Ok(0)
      }
    }

    /// Fold the global accumulator into one deployment's accumulator.
    fn fold_deployment(
      deployment: DeploymentId,
      new_allocated_tokens: Option<Balance>,
    ) -> Result<Balance, DispatchError> {
      Self::take_rewards_snapshot()?;
      let acc_global = AccRewardsPerToken::<T>::get();

      DeploymentRewards::<T>::mutate(deployment, |dep| {
        let delta = acc_global.saturating_sub(dep.acc_rewards_per_token_snapshot);
        // Deployments with no stake earn nothing for the elapsed window; the
        // skipped delta is what keeps zero-token states reward-ineligible.
        if dep.allocated_tokens > 0 {
          dep.acc_rewards_per_allocated_token =
            dep.acc_rewards_per_allocated_token.saturating_add(delta);
        }
        dep.acc_rewards_per_token_snapshot = acc_global;

        if let Some(new_tokens) = new_allocated_tokens {
          let old_tokens = dep.allocated_tokens;
          dep.allocated_tokens = new_tokens;
          TotalTokensAllocated::<T>::mutate(|total| {
            *total = total.saturating_sub(old_tokens).saturating_add(new_tokens)
          });
        }
        Ok(dep.acc_rewards_per_allocated_token)
      })
    }
  }

  impl<T: Config> RewardsAccrual for Pallet<T> {
    fn on_deployment_update(
      deployment: DeploymentId,
      allocated_tokens: Balance,
    ) -> Result<Balance, DispatchError> {
      Self::fold_deployment(deployment, Some(allocated_tokens))
    }

    fn acc_rewards_per_allocated_token(
      deployment: DeploymentId,
    ) -> Result<Balance, DispatchError> {
      Self::fold_deployment(deployment, None)
    }
  }
}
