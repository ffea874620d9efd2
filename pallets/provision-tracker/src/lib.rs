//! Provision Tracker Pallet
//!
//! Keyed ledger of collateral a service provider has earmarked for individual
//! data services. Pure bookkeeping: capacity comes from the host staking
//! registry and no tokens move through this pallet.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
pub mod mock;

#[frame::pallet]
pub mod pallet {
  use frame::deps::sp_runtime::DispatchError;
  use frame::prelude::*;
  use primitives::{Balance, ProviderStake, ProvisionTracking};

  /// Configuration trait for the provision tracker pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Host staking registry exposing each owner's total provisioned stake.
    type StakingProviders: ProviderStake<Self::AccountId>;
  }

  /// The pallet struct
  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Tokens currently locked per (owner, consumer) pair.
  #[pallet::storage]
  #[pallet::getter(fn locked_tokens)]
  pub type Locked<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    T::AccountId, // owner (service provider)
    Blake2_128Concat,
    T::AccountId, // consumer (data service)
    Balance,
    ValueQuery,
  >;

  /// Tokens locked across all consumers sharing one owner's provision.
  #[pallet::storage]
  #[pallet::getter(fn total_locked)]
  pub type TotalLocked<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, Balance, ValueQuery>;

  /// Events for the provision tracker pallet
  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Collateral was earmarked for a consumer.
    ProvisionLocked {
      owner: T::AccountId,
      consumer: T::AccountId,
      amount: Balance,
      pair_total: Balance,
    },
    /// Collateral was returned to the shared pool.
    ProvisionReleased {
      owner: T::AccountId,
      consumer: T::AccountId,
      amount: Balance,
      pair_total: Balance,
    },
  }

  /// Errors for the provision tracker pallet
  #[pallet::error]
  pub enum Error<T> {
    /// The lock exceeds the owner's remaining provisioned capacity.
    InsufficientCapacity,
    /// The release exceeds the pair's currently locked total.
    OverRelease,
    /// Arithmetic overflow occurred
    ArithmeticOverflow,
  }

  impl<T: Config> ProvisionTracking<T::AccountId> for Pallet<T> {
    fn lock(
      owner: &T::AccountId,
      consumer: &T::AccountId,
      amount: Balance,
    ) -> Result<Balance, DispatchError> {
      if amount == 0 {
        return Ok(Locked::<T>::get(owner, consumer));
      }
      let capacity = T::StakingProviders::provisioned_stake(owner);
      let owner_total = TotalLocked::<T>::get(owner)
        .checked_add(amount)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      ensure!(owner_total <= capacity, Error::<T>::InsufficientCapacity);

      let pair_total = Locked::<T>::get(owner, consumer)
        .checked_add(amount)
        .ok_or(Error::<T>::ArithmeticOverflow)?;

      TotalLocked::<T>::insert(owner, owner_total);
      Locked::<T>::insert(owner, consumer, pair_total);

      Self::deposit_event(Event::ProvisionLocked {
        owner: owner.clone(),
        consumer: consumer.clone(),
        amount,
        pair_total,
      });
      Ok(pair_total)
    }

    fn release(
      owner: &T::AccountId,
      consumer: &T::AccountId,
      amount: Balance,
    ) -> Result<Balance, DispatchError> {
      if amount == 0 {
        return Ok(Locked::<T>::get(owner, consumer));
      }
      let locked = Locked::<T>::get(owner, consumer);
      ensure!(amount <= locked, Error::<T>::OverRelease);

      let pair_total = locked - amount;
      if pair_total == 0 {
        Locked::<T>::remove(owner, consumer);
      } else {
        Locked::<T>::insert(owner, consumer, pair_total);
      }
      TotalLocked::<T>::mutate(owner, |total| *total = total.saturating_sub(amount));

      Self::deposit_event(Event::ProvisionReleased {
        owner: owner.clone(),
        consumer: consumer.clone(),
        amount,
        pair_total,
      });
      Ok(pair_total)
    }

    fn locked(owner: &T::AccountId, consumer: &T::AccountId) -> Balance {
      Locked::<T>::get(owner, consumer)
    }

    fn available(owner: &T::AccountId) -> Balance {
      T::StakingProviders::provisioned_stake(owner).saturating_sub(TotalLocked::<T>::get(owner))
    }
  }
}
