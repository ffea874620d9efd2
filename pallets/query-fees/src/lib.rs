//! Query Fees Pallet
//!
//! Redeems query fees against open allocations through receipt aggregate
//! vouchers (RAVs). A RAV carries the lifetime value a payer owes one service
//! provider; only the marginal amount since the previous redemption is
//! processed. Collected fees pass through a curation cut and a protocol tax,
//! then feed a per-allocation exponential rebate pool: the share of fees an
//! allocation earns back grows with the stake behind it, and the unearned
//! remainder is burned. Every collection also locks a slashable multiple of
//! the fees for a dispute period.

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
  use frame::deps::{
    frame_support::traits::{
      fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
      tokens::{Fortitude, Precision, Preservation},
    },
    sp_runtime::{traits::AccountIdConversion, DispatchError, Permill},
  };
  use frame::prelude::*;
  use polkadot_sdk::{sp_core, sp_io};
  use primitives::{
    rebates, AllocationInspector, Balance, CurationDeposit, PaymentTypes, ProvisionTracking,
  };

  /// Verifies a payer's signature over a receipt aggregate voucher.
  ///
  /// The payer account doubles as the signing key.
  pub trait RavVerifier<AccountId> {
    fn verify(rav: &ReceiptAggregateVoucher<AccountId>, signature: &[u8; 64]) -> bool;
  }

  /// sr25519 RAV signatures, for runtimes whose account ids are 32-byte
  /// public keys.
  pub struct Sr25519RavVerifier;
  impl<AccountId: Encode> RavVerifier<AccountId> for Sr25519RavVerifier {
    fn verify(rav: &ReceiptAggregateVoucher<AccountId>, signature: &[u8; 64]) -> bool {
      let raw: [u8; 32] = match rav.payer.encode().try_into() {
        Ok(raw) => raw,
        Err(_) => return false,
      };
      let public = sp_core::sr25519::Public::from_raw(raw);
      let signature = sp_core::sr25519::Signature::from_raw(*signature);
      sp_io::crypto::sr25519_verify(&signature, &rav.encode(), &public)
    }
  }

  /// Configuration trait for the query fees pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// The currency trait for moving and burning collected fees
    type Currency: NativeInspect<Self::AccountId, Balance = u128>
      + NativeMutate<Self::AccountId, Balance = u128>;

    /// Read access to allocation records
    type Allocations: AllocationInspector<Self::AccountId>;

    /// The provisioned-collateral ledger used for slashable stake claims
    type Provisions: ProvisionTracking<Self::AccountId>;

    /// Sink for the curation share of collected fees
    type Curation: CurationDeposit<Self::AccountId>;

    /// RAV signature verification
    type RavVerifier: RavVerifier<Self::AccountId>;

    /// The pallet ID, used as the fee escrow account and provision consumer
    #[pallet::constant]
    type PalletId: Get<frame::deps::frame_support::PalletId>;

    /// Blocks a stake claim stays locked after a collection
    #[pallet::constant]
    type DisputePeriod: Get<BlockNumberFor<Self>>;

    /// Bound on the pending stake-claim queue per service provider
    #[pallet::constant]
    type MaxPendingStakeClaims: Get<u32>;

    /// Default rebate alpha ratio
    #[pallet::constant]
    type DefaultAlphaNumerator: Get<u32>;
    #[pallet::constant]
    type DefaultAlphaDenominator: Get<u32>;

    /// Default rebate lambda ratio
    #[pallet::constant]
    type DefaultLambdaNumerator: Get<u32>;
    #[pallet::constant]
    type DefaultLambdaDenominator: Get<u32>;

    /// Default share of collected fees routed to curation
    #[pallet::constant]
    type DefaultCurationCut: Get<Permill>;

    /// Default protocol tax burned from every collection
    #[pallet::constant]
    type DefaultProtocolTax: Get<Permill>;

    /// Default multiple of collected fees locked as slashable stake
    #[pallet::constant]
    type DefaultStakeToFeesRatio: Get<Balance>;

    /// Origin that can perform governance operations
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  /// The pallet struct
  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// The lifetime value a payer vouches it owes one service provider.
  #[derive(
    Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo,
  )]
  pub struct ReceiptAggregateVoucher<AccountId> {
    pub payer: AccountId,
    pub service_provider: AccountId,
    pub allocation_id: AccountId,
    pub value_aggregate: Balance,
  }

  /// Lifetime fee intake and payout of one allocation's rebate pool.
  #[derive(
    Clone, Debug, Decode, DecodeWithMemTracking, Default, Encode, Eq, MaxEncodedLen, PartialEq,
    TypeInfo,
  )]
  pub struct RebatePool {
    pub collected_fees: Balance,
    pub distributed_rebates: Balance,
  }

  /// Provisioned stake held against a collection until its dispute period
  /// elapses.
  #[derive(
    Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo,
  )]
  pub struct StakeClaim<BlockNumber> {
    pub tokens: Balance,
    pub unlock_at: BlockNumber,
  }

  /// Lifetime tokens collected per (service_provider, payer) pair.
  #[pallet::storage]
  #[pallet::getter(fn tokens_collected)]
  pub type TokensCollected<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    T::AccountId, // service provider
    Blake2_128Concat,
    T::AccountId, // payer
    Balance,
    ValueQuery,
  >;

  /// Rebate pools, keyed by allocation id.
  #[pallet::storage]
  #[pallet::getter(fn allocation_rebates)]
  pub type AllocationRebates<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, RebatePool, ValueQuery>;

  /// Pending stake claims per service provider, oldest first.
  #[pallet::storage]
  #[pallet::getter(fn stake_claims)]
  pub type StakeClaims<T: Config> = StorageMap<
    _,
    Blake2_128Concat,
    T::AccountId,
    BoundedVec<StakeClaim<BlockNumberFor<T>>, T::MaxPendingStakeClaims>,
    ValueQuery,
  >;

  /// Rebate curve alpha, as a ratio.
  #[pallet::storage]
  #[pallet::getter(fn alpha_numerator)]
  pub type AlphaNumerator<T: Config> =
    StorageValue<_, u32, ValueQuery, T::DefaultAlphaNumerator>;
  #[pallet::storage]
  #[pallet::getter(fn alpha_denominator)]
  pub type AlphaDenominator<T: Config> =
    StorageValue<_, u32, ValueQuery, T::DefaultAlphaDenominator>;

  /// Rebate curve lambda, as a ratio.
  #[pallet::storage]
  #[pallet::getter(fn lambda_numerator)]
  pub type LambdaNumerator<T: Config> =
    StorageValue<_, u32, ValueQuery, T::DefaultLambdaNumerator>;
  #[pallet::storage]
  #[pallet::getter(fn lambda_denominator)]
  pub type LambdaDenominator<T: Config> =
    StorageValue<_, u32, ValueQuery, T::DefaultLambdaDenominator>;

  /// Share of collected fees routed to the deployment's curation pool.
  #[pallet::storage]
  #[pallet::getter(fn curation_cut)]
  pub type CurationCut<T: Config> =
    StorageValue<_, Permill, ValueQuery, T::DefaultCurationCut>;

  /// Protocol tax burned from every collection.
  #[pallet::storage]
  #[pallet::getter(fn protocol_tax)]
  pub type ProtocolTax<T: Config> =
    StorageValue<_, Permill, ValueQuery, T::DefaultProtocolTax>;

  /// Multiple of collected fees locked as slashable stake.
  #[pallet::storage]
  #[pallet::getter(fn stake_to_fees_ratio)]
  pub type StakeToFeesRatio<T: Config> =
    StorageValue<_, Balance, ValueQuery, T::DefaultStakeToFeesRatio>;

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    #[serde(skip)]
    pub _marker: core::marker::PhantomData<T>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }

  /// Events for the query fees pallet
  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Query fees were redeemed against an allocation.
    QueryFeesCollected {
      payer: T::AccountId,
      service_provider: T::AccountId,
      allocation_id: T::AccountId,
      tokens: Balance,
      curation: Balance,
      protocol_tax: Balance,
      rebate: Balance,
      burnt: Balance,
    },
    /// Matured stake claims were released back to the provision pool.
    StakeReleased {
      service_provider: T::AccountId,
      tokens: Balance,
      remaining_claims: u32,
    },
    /// The rebate curve parameters changed.
    RebateParametersSet {
      alpha_numerator: u32,
      alpha_denominator: u32,
      lambda_numerator: u32,
      lambda_denominator: u32,
    },
    /// The curation cut changed.
    CurationCutSet { cut: Permill },
    /// The protocol tax changed.
    ProtocolTaxSet { tax: Permill },
    /// The stake-to-fees ratio changed.
    StakeToFeesRatioSet { ratio: Balance },
  }

  /// Errors for the query fees pallet
  #[pallet::error]
  pub enum Error<T> {
    /// This entry point does not serve the given payment type.
    InvalidPaymentType,
    /// The RAV signature does not verify against the payer.
    InvalidRavSignature,
    /// No allocation is on file under the voucher's allocation id.
    AllocationDoesNotExist,
    /// The allocation is closed.
    AllocationNotOpen,
    /// The voucher names a service provider other than the allocation's
    /// indexer.
    IndexerMismatch,
    /// The voucher's aggregate does not exceed what was already collected.
    InconsistentTokens,
    /// The service provider's stake-claim queue is full.
    TooManyStakeClaims,
    /// Rebate ratio denominators must be non-zero.
    InvalidRebateParameters,
    /// Arithmetic overflow occurred
    ArithmeticOverflow,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Redeem a signed receipt aggregate voucher.
    ///
    /// Dispatches on `payment_type`; this pallet only serves
    /// `PaymentTypes::QueryFee`.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::collect())]
    pub fn collect(
      origin: OriginFor<T>,
      payment_type: PaymentTypes,
      rav: ReceiptAggregateVoucher<T::AccountId>,
      signature: [u8; 64],
    ) -> DispatchResult {
      ensure_signed(origin)?;
      match payment_type {
        PaymentTypes::QueryFee => Self::collect_query_fees(rav, signature),
        _ => Err(Error::<T>::InvalidPaymentType.into()),
      }
    }

    /// Release every matured stake claim of a service provider.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::release_expired_stake())]
    pub fn release_expired_stake(
      origin: OriginFor<T>,
      service_provider: T::AccountId,
    ) -> DispatchResult {
      ensure_signed(origin)?;
      Self::do_release_expired_stake(&service_provider)?;
      Ok(())
    }

    /// Update the rebate curve parameters (governance only).
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_rebate_parameters())]
    pub fn set_rebate_parameters(
      origin: OriginFor<T>,
      alpha_numerator: u32,
      alpha_denominator: u32,
      lambda_numerator: u32,
      lambda_denominator: u32,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(
        alpha_denominator > 0 && lambda_denominator > 0,
        Error::<T>::InvalidRebateParameters
      );
      AlphaNumerator::<T>::put(alpha_numerator);
      AlphaDenominator::<T>::put(alpha_denominator);
      LambdaNumerator::<T>::put(lambda_numerator);
      LambdaDenominator::<T>::put(lambda_denominator);
      Self::deposit_event(Event::RebateParametersSet {
        alpha_numerator,
        alpha_denominator,
        lambda_numerator,
        lambda_denominator,
      });
      Ok(())
    }

    /// Update the curation cut (governance only).
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::set_curation_cut())]
    pub fn set_curation_cut(origin: OriginFor<T>, cut: Permill) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      CurationCut::<T>::put(cut);
      Self::deposit_event(Event::CurationCutSet { cut });
      Ok(())
    }

    /// Update the protocol tax (governance only).
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::set_protocol_tax())]
    pub fn set_protocol_tax(origin: OriginFor<T>, tax: Permill) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ProtocolTax::<T>::put(tax);
      Self::deposit_event(Event::ProtocolTaxSet { tax });
      Ok(())
    }

    /// Update the stake-to-fees ratio (governance only).
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::set_stake_to_fees_ratio())]
    pub fn set_stake_to_fees_ratio(origin: OriginFor<T>, ratio: Balance) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      StakeToFeesRatio::<T>::put(ratio);
      Self::deposit_event(Event::StakeToFeesRatioSet { ratio });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// The pallet account: fee escrow and provision consumer.
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    fn collect_query_fees(
      rav: ReceiptAggregateVoucher<T::AccountId>,
      signature: [u8; 64],
    ) -> DispatchResult {
      ensure!(
        T::RavVerifier::verify(&rav, &signature),
        Error::<T>::InvalidRavSignature
      );
      let allocation = T::Allocations::allocation(&rav.allocation_id)
        .ok_or(Error::<T>::AllocationDoesNotExist)?;
      ensure!(allocation.is_open, Error::<T>::AllocationNotOpen);
      ensure!(
        allocation.indexer == rav.service_provider,
        Error::<T>::IndexerMismatch
      );

      // Only the marginal value since the last redemption is processed.
      let already_collected = TokensCollected::<T>::get(&rav.service_provider, &rav.payer);
      ensure!(
        rav.value_aggregate > already_collected,
        Error::<T>::InconsistentTokens
      );
      let tokens = rav.value_aggregate - already_collected;
      TokensCollected::<T>::insert(&rav.service_provider, &rav.payer, rav.value_aggregate);

      Self::lock_collection_stake(&rav.service_provider, tokens)?;

      let escrow = Self::account_id();
      T::Currency::transfer(&rav.payer, &escrow, tokens, Preservation::Expendable)?;

      let curation = CurationCut::<T>::get().mul_floor(tokens);
      let protocol_tax = ProtocolTax::<T>::get().mul_floor(tokens);
      let query_fees = tokens
        .checked_sub(curation)
        .and_then(|rest| rest.checked_sub(protocol_tax))
        .ok_or(Error::<T>::ArithmeticOverflow)?;

      if protocol_tax > 0 {
        Self::burn_from_escrow(protocol_tax)?;
      }
      if curation > 0 {
        T::Curation::deposit(&escrow, allocation.deployment_id, curation)?;
      }

      let (rebate, burnt) =
        Self::settle_rebate(&rav.allocation_id, allocation.tokens, query_fees)?;
      if rebate > 0 {
        T::Currency::transfer(
          &escrow,
          &rav.service_provider,
          rebate,
          Preservation::Expendable,
        )?;
      }
      if burnt > 0 {
        Self::burn_from_escrow(burnt)?;
      }

      Self::deposit_event(Event::QueryFeesCollected {
        payer: rav.payer,
        service_provider: rav.service_provider,
        allocation_id: rav.allocation_id,
        tokens,
        curation,
        protocol_tax,
        rebate,
        burnt,
      });
      Ok(())
    }

    /// Feed `query_fees` into the allocation's rebate pool and settle the
    /// payout.
    ///
    /// The pool pays out the increase of the continuous rebate curve over the
    /// pool's lifetime intake, never more than the fees just collected, so
    /// `distributed_rebates <= collected_fees` holds unconditionally.
    fn settle_rebate(
      allocation_id: &T::AccountId,
      stake: Balance,
      query_fees: Balance,
    ) -> Result<(Balance, Balance), DispatchError> {
      let mut pool = AllocationRebates::<T>::get(allocation_id);
      pool.collected_fees = pool
        .collected_fees
        .checked_add(query_fees)
        .ok_or(Error::<T>::ArithmeticOverflow)?;

      let accumulated = rebates::exponential_rebates(
        pool.collected_fees,
        stake,
        AlphaNumerator::<T>::get(),
        AlphaDenominator::<T>::get(),
        LambdaNumerator::<T>::get(),
        LambdaDenominator::<T>::get(),
      )
      .ok_or(Error::<T>::ArithmeticOverflow)?;

      let rebate = accumulated
        .saturating_sub(pool.distributed_rebates)
        .min(query_fees);
      let burnt = query_fees - rebate;

      pool.distributed_rebates = pool.distributed_rebates.saturating_add(rebate);
      AllocationRebates::<T>::insert(allocation_id, pool);
      Ok((rebate, burnt))
    }

    /// Lock the slashable stake behind a collection and queue its claim.
    ///
    /// Matured claims are released first so a busy but honest provider never
    /// runs out of queue space.
    fn lock_collection_stake(
      service_provider: &T::AccountId,
      tokens: Balance,
    ) -> DispatchResult {
      let required = StakeToFeesRatio::<T>::get()
        .checked_mul(tokens)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      if required == 0 {
        return Ok(());
      }
      Self::do_release_expired_stake(service_provider)?;

      T::Provisions::lock(service_provider, &Self::account_id(), required)?;
      StakeClaims::<T>::try_mutate(service_provider, |claims| {
        claims
          .try_push(StakeClaim {
            tokens: required,
            unlock_at: frame_system::Pallet::<T>::block_number()
              .saturating_add(T::DisputePeriod::get()),
          })
          .map_err(|_| Error::<T>::TooManyStakeClaims)
      })?;
      Ok(())
    }

    /// Release matured claims from the front of the queue.
    ///
    /// Claims unlock in insertion order, so the first unexpired claim ends
    /// the scan.
    fn do_release_expired_stake(service_provider: &T::AccountId) -> DispatchResult {
      let now = frame_system::Pallet::<T>::block_number();
      let mut released = 0u128;
      let mut remaining = 0u32;

      StakeClaims::<T>::try_mutate(service_provider, |claims| -> DispatchResult {
        let matured = claims
          .iter()
          .take_while(|claim| claim.unlock_at <= now)
          .count();
        for claim in claims.iter().take(matured) {
          released = released.saturating_add(claim.tokens);
        }
        let kept: alloc::vec::Vec<_> = claims.iter().skip(matured).cloned().collect();
        *claims = BoundedVec::truncate_from(kept);
        remaining = claims.len() as u32;
        Ok(())
      })?;

      if released > 0 {
        T::Provisions::release(service_provider, &Self::account_id(), released)?;
        Self::deposit_event(Event::StakeReleased {
          service_provider: service_provider.clone(),
          tokens: released,
          remaining_claims: remaining,
        });
      }
      Ok(())
    }

    fn burn_from_escrow(amount: Balance) -> DispatchResult {
      T::Currency::burn_from(
        &Self::account_id(),
        amount,
        Preservation::Expendable,
        Precision::Exact,
        Fortitude::Polite,
      )?;
      Ok(())
    }
  }
}

/// Seeds allocations, provisions and signatures when benchmarking against
/// runtimes with opaque collaborators.
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn setup_allocation(
    allocation_id: &AccountId,
    indexer: &AccountId,
    deployment: primitives::DeploymentId,
    tokens: primitives::Balance,
  );
  fn setup_provision(indexer: &AccountId, stake: primitives::Balance);
  fn rav_signature(rav: &pallet::ReceiptAggregateVoucher<AccountId>) -> [u8; 64];
}
