//! Allocation Manager Pallet
//!
//! Indexer registry and allocation lifecycle for the indexing market. An
//! allocation pins an indexer's provisioned stake to one subgraph deployment;
//! periodic proofs of indexing collect the inflation rewards that accrued to
//! the deployment since the previous proof. Records are append-only: a closed
//! allocation stays on file so its id can never be reused.

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
  use alloc::vec::Vec;
  use frame::deps::{
    frame_support::traits::fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
    sp_runtime::{traits::AccountIdConversion, DispatchError, Permill},
  };
  use frame::prelude::*;
  use polkadot_sdk::{sp_core, sp_io};
  use primitives::{
    fixed_math, params::FIXED_POINT_SCALE, AllocationInspector, AllocationView, Balance,
    DeploymentId, Poi, ProvisionTracking, RewardsAccrual,
  };

  /// Verifies that whoever generated an allocation id consented to the
  /// indexer using it.
  ///
  /// The allocation id doubles as a public key; the proof is a signature by
  /// that key over `(indexer, allocation_id)`.
  pub trait OwnershipProofVerifier<AccountId> {
    fn verify(indexer: &AccountId, allocation_id: &AccountId, proof: &[u8; 64]) -> bool;
  }

  /// sr25519 ownership proofs, for runtimes whose account ids are 32-byte
  /// public keys.
  pub struct Sr25519OwnershipProof;
  impl<AccountId: Encode> OwnershipProofVerifier<AccountId> for Sr25519OwnershipProof {
    fn verify(indexer: &AccountId, allocation_id: &AccountId, proof: &[u8; 64]) -> bool {
      let raw: [u8; 32] = match allocation_id.encode().try_into() {
        Ok(raw) => raw,
        Err(_) => return false,
      };
      let public = sp_core::sr25519::Public::from_raw(raw);
      let signature = sp_core::sr25519::Signature::from_raw(*proof);
      let message = (indexer, allocation_id).encode();
      sp_io::crypto::sr25519_verify(&signature, &message, &public)
    }
  }

  /// Configuration trait for the allocation manager pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// The currency trait for minting indexing rewards
    type Currency: NativeInspect<Self::AccountId, Balance = u128>
      + NativeMutate<Self::AccountId, Balance = u128>;

    /// The provisioned-collateral ledger backing allocations
    type Provisions: ProvisionTracking<Self::AccountId>;

    /// Per-deployment reward accrual
    type Rewards: RewardsAccrual;

    /// Allocation-id ownership proof verification
    type OwnershipProof: OwnershipProofVerifier<Self::AccountId>;

    /// The pallet ID, used as the provision consumer and for the
    /// delegation-pool sub-accounts
    #[pallet::constant]
    type PalletId: Get<frame::deps::frame_support::PalletId>;

    /// Oldest a proof of indexing may be (in blocks) and still collect the
    /// rewards window it covers
    #[pallet::constant]
    type MaxPoiStaleness: Get<BlockNumberFor<Self>>;

    /// Share of collected indexing rewards routed to the indexer's
    /// delegation pool
    #[pallet::constant]
    type DelegationCut: Get<Permill>;

    /// Maximum byte length of indexer metadata fields (url, geohash)
    #[pallet::constant]
    type MaxMetadataLength: Get<u32>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  /// The pallet struct
  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Public metadata an indexer registers before allocating.
  #[derive(Decode, DecodeWithMemTracking, Encode, TypeInfo, MaxEncodedLen)]
  #[scale_info(skip_type_params(MaxMetadataLength))]
  pub struct IndexerInfo<BlockNumber, MaxMetadataLength: Get<u32>> {
    pub url: BoundedVec<u8, MaxMetadataLength>,
    pub geohash: BoundedVec<u8, MaxMetadataLength>,
    pub registered_at: BlockNumber,
  }

  pub type IndexerInfoOf<T> =
    IndexerInfo<BlockNumberFor<T>, <T as Config>::MaxMetadataLength>;

  /// One allocation of provisioned stake to a subgraph deployment.
  #[derive(
    Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo,
  )]
  pub struct Allocation<AccountId, BlockNumber> {
    pub indexer: AccountId,
    pub deployment_id: DeploymentId,
    pub tokens: Balance,
    pub created_at: BlockNumber,
    pub closed_at: Option<BlockNumber>,
    pub last_poi_presented_at: Option<BlockNumber>,
    /// Deployment accumulator value at the last collection or resize.
    pub acc_rewards_per_allocated_token: Balance,
    /// Rewards banked by resizes, collectable with the next fresh proof.
    pub acc_rewards_pending: Balance,
  }

  pub type AllocationOf<T> =
    Allocation<<T as frame_system::Config>::AccountId, BlockNumberFor<T>>;

  /// Pre-migration allocation imported from the previous protocol version.
  #[derive(
    Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo,
  )]
  pub struct LegacyAllocation<AccountId> {
    pub indexer: AccountId,
    pub deployment_id: DeploymentId,
    pub tokens: Balance,
  }

  /// Registered indexers.
  #[pallet::storage]
  #[pallet::getter(fn indexer)]
  pub type Indexers<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, IndexerInfoOf<T>, OptionQuery>;

  /// Operator approvals: (indexer, operator) -> allowed.
  #[pallet::storage]
  #[pallet::getter(fn is_operator)]
  pub type Operators<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    T::AccountId,
    Blake2_128Concat,
    T::AccountId,
    bool,
    ValueQuery,
  >;

  /// Where an indexer's share of collected rewards is sent. Defaults to the
  /// indexer itself when unset.
  #[pallet::storage]
  #[pallet::getter(fn rewards_destination)]
  pub type RewardsDestinations<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, T::AccountId, OptionQuery>;

  /// All allocations ever created, keyed by allocation id.
  #[pallet::storage]
  #[pallet::getter(fn allocations)]
  pub type Allocations<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, AllocationOf<T>, OptionQuery>;

  /// Tokens allocated per deployment across all open allocations.
  #[pallet::storage]
  #[pallet::getter(fn subgraph_allocated_tokens)]
  pub type SubgraphAllocatedTokens<T: Config> =
    StorageMap<_, Blake2_128Concat, DeploymentId, Balance, ValueQuery>;

  /// Imported allocations awaiting one-shot migration.
  #[pallet::storage]
  #[pallet::getter(fn legacy_allocation)]
  pub type LegacyAllocations<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, LegacyAllocation<T::AccountId>, OptionQuery>;

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    /// (allocation_id, indexer, deployment_id, tokens)
    pub legacy_allocations: Vec<(T::AccountId, T::AccountId, DeploymentId, Balance)>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      for (allocation_id, indexer, deployment_id, tokens) in &self.legacy_allocations {
        LegacyAllocations::<T>::insert(
          allocation_id,
          LegacyAllocation {
            indexer: indexer.clone(),
            deployment_id: *deployment_id,
            tokens: *tokens,
          },
        );
      }
    }
  }

  /// Events for the allocation manager pallet
  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// An indexer registered its public metadata.
    IndexerRegistered {
      indexer: T::AccountId,
      url: Vec<u8>,
      geohash: Vec<u8>,
    },
    /// An operator approval changed.
    OperatorSet {
      indexer: T::AccountId,
      operator: T::AccountId,
      allowed: bool,
    },
    /// The rewards destination changed (`None` restores the default).
    RewardsDestinationSet {
      indexer: T::AccountId,
      destination: Option<T::AccountId>,
    },
    /// A new allocation went active.
    AllocationCreated {
      indexer: T::AccountId,
      deployment_id: DeploymentId,
      allocation_id: T::AccountId,
      tokens: Balance,
    },
    /// An active allocation changed size.
    AllocationResized {
      allocation_id: T::AccountId,
      old_tokens: Balance,
      new_tokens: Balance,
    },
    /// A proof of indexing was presented. `rewards` is zero when the proof
    /// was stale and the window forfeited.
    PoiPresented {
      allocation_id: T::AccountId,
      deployment_id: DeploymentId,
      poi: Poi,
      rewards: Balance,
      delegation_rewards: Balance,
    },
    /// An allocation was closed and its provision released.
    AllocationClosed {
      allocation_id: T::AccountId,
      deployment_id: DeploymentId,
      tokens: Balance,
    },
    /// A legacy record became a closed allocation.
    LegacyAllocationMigrated { allocation_id: T::AccountId },
  }

  /// Errors for the allocation manager pallet
  #[pallet::error]
  pub enum Error<T> {
    /// Caller is neither the indexer nor an approved operator.
    NotAuthorized,
    /// The indexer is already registered.
    AlreadyRegistered,
    /// The account has not registered as an indexer.
    NotRegistered,
    /// The registration url must not be empty.
    EmptyUrl,
    /// A metadata field exceeds the configured maximum length.
    MetadataTooLong,
    /// The all-zero allocation id is reserved.
    InvalidZeroAllocationId,
    /// An allocation (current or legacy) already uses this id.
    AllocationAlreadyExists,
    /// No allocation is on file under this id.
    AllocationDoesNotExist,
    /// The operation needs an open allocation.
    AllocationAlreadyClosed,
    /// The ownership proof does not verify against the allocation id.
    InvalidProof,
    /// An allocation must start with a positive token amount.
    ZeroTokensAllocation,
    /// The all-zero proof of indexing is reserved.
    InvalidZeroPoi,
    /// Arithmetic overflow occurred
    ArithmeticOverflow,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Register the caller as an indexer.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::register())]
    pub fn register(origin: OriginFor<T>, url: Vec<u8>, geohash: Vec<u8>) -> DispatchResult {
      let indexer = ensure_signed(origin)?;
      ensure!(
        !Indexers::<T>::contains_key(&indexer),
        Error::<T>::AlreadyRegistered
      );
      ensure!(!url.is_empty(), Error::<T>::EmptyUrl);
      let bounded_url: BoundedVec<u8, T::MaxMetadataLength> =
        url.clone().try_into().map_err(|_| Error::<T>::MetadataTooLong)?;
      let bounded_geohash: BoundedVec<u8, T::MaxMetadataLength> = geohash
        .clone()
        .try_into()
        .map_err(|_| Error::<T>::MetadataTooLong)?;

      Indexers::<T>::insert(
        &indexer,
        IndexerInfo {
          url: bounded_url,
          geohash: bounded_geohash,
          registered_at: frame_system::Pallet::<T>::block_number(),
        },
      );
      Self::deposit_event(Event::IndexerRegistered {
        indexer,
        url,
        geohash,
      });
      Ok(())
    }

    /// Approve or revoke an operator for the calling indexer.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_operator())]
    pub fn set_operator(
      origin: OriginFor<T>,
      operator: T::AccountId,
      allowed: bool,
    ) -> DispatchResult {
      let indexer = ensure_signed(origin)?;
      ensure!(
        Indexers::<T>::contains_key(&indexer),
        Error::<T>::NotRegistered
      );
      if allowed {
        Operators::<T>::insert(&indexer, &operator, true);
      } else {
        Operators::<T>::remove(&indexer, &operator);
      }
      Self::deposit_event(Event::OperatorSet {
        indexer,
        operator,
        allowed,
      });
      Ok(())
    }

    /// Redirect the indexer share of collected rewards, or reset it to the
    /// indexer's own account.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_rewards_destination())]
    pub fn set_rewards_destination(
      origin: OriginFor<T>,
      destination: Option<T::AccountId>,
    ) -> DispatchResult {
      let indexer = ensure_signed(origin)?;
      ensure!(
        Indexers::<T>::contains_key(&indexer),
        Error::<T>::NotRegistered
      );
      match &destination {
        Some(dest) => RewardsDestinations::<T>::insert(&indexer, dest),
        None => RewardsDestinations::<T>::remove(&indexer),
      }
      Self::deposit_event(Event::RewardsDestinationSet {
        indexer,
        destination,
      });
      Ok(())
    }

    /// Open a new allocation of `tokens` provisioned stake to `deployment_id`.
    ///
    /// `allocation_id` is a caller-chosen key that must be globally fresh and
    /// accompanied by an ownership proof; this makes ids unforgeable without
    /// the pallet issuing them.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::start_allocation())]
    pub fn start_allocation(
      origin: OriginFor<T>,
      indexer: T::AccountId,
      deployment_id: DeploymentId,
      tokens: Balance,
      allocation_id: T::AccountId,
      proof: [u8; 64],
    ) -> DispatchResult {
      let caller = ensure_signed(origin)?;
      Self::ensure_indexer_or_operator(&caller, &indexer)?;
      ensure!(
        Indexers::<T>::contains_key(&indexer),
        Error::<T>::NotRegistered
      );
      ensure!(
        !allocation_id.encode().iter().all(|b| *b == 0),
        Error::<T>::InvalidZeroAllocationId
      );
      ensure!(
        !Allocations::<T>::contains_key(&allocation_id)
          && !LegacyAllocations::<T>::contains_key(&allocation_id),
        Error::<T>::AllocationAlreadyExists
      );
      ensure!(
        T::OwnershipProof::verify(&indexer, &allocation_id, &proof),
        Error::<T>::InvalidProof
      );
      ensure!(tokens > 0, Error::<T>::ZeroTokensAllocation);

      T::Provisions::lock(&indexer, &Self::account_id(), tokens)?;

      let deployment_total = SubgraphAllocatedTokens::<T>::get(deployment_id)
        .checked_add(tokens)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      let acc = T::Rewards::on_deployment_update(deployment_id, deployment_total)?;
      SubgraphAllocatedTokens::<T>::insert(deployment_id, deployment_total);

      Allocations::<T>::insert(
        &allocation_id,
        Allocation {
          indexer: indexer.clone(),
          deployment_id,
          tokens,
          created_at: frame_system::Pallet::<T>::block_number(),
          closed_at: None,
          last_poi_presented_at: None,
          acc_rewards_per_allocated_token: acc,
          acc_rewards_pending: 0,
        },
      );

      Self::deposit_event(Event::AllocationCreated {
        indexer,
        deployment_id,
        allocation_id,
        tokens,
      });
      Ok(())
    }

    /// Change the size of an open allocation.
    ///
    /// Rewards accrued at the old size are banked into the allocation before
    /// the deployment total moves, so a resize never reprices elapsed time.
    /// Shrinking to zero is allowed; the allocation stays open but earns no
    /// further rewards until grown again.
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::resize_allocation())]
    pub fn resize_allocation(
      origin: OriginFor<T>,
      allocation_id: T::AccountId,
      new_tokens: Balance,
    ) -> DispatchResult {
      let caller = ensure_signed(origin)?;
      let mut alloc =
        Allocations::<T>::get(&allocation_id).ok_or(Error::<T>::AllocationDoesNotExist)?;
      Self::ensure_indexer_or_operator(&caller, &alloc.indexer)?;
      ensure!(alloc.closed_at.is_none(), Error::<T>::AllocationAlreadyClosed);

      let old_tokens = alloc.tokens;
      if new_tokens == old_tokens {
        return Ok(());
      }

      let deployment_total = SubgraphAllocatedTokens::<T>::get(alloc.deployment_id)
        .saturating_sub(old_tokens)
        .checked_add(new_tokens)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      let acc = T::Rewards::on_deployment_update(alloc.deployment_id, deployment_total)?;
      SubgraphAllocatedTokens::<T>::insert(alloc.deployment_id, deployment_total);

      let earned = fixed_math::mul_div(
        old_tokens,
        acc.saturating_sub(alloc.acc_rewards_per_allocated_token),
        FIXED_POINT_SCALE,
      )
      .ok_or(Error::<T>::ArithmeticOverflow)?;
      alloc.acc_rewards_pending = alloc
        .acc_rewards_pending
        .checked_add(earned)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      alloc.acc_rewards_per_allocated_token = acc;

      if new_tokens > old_tokens {
        T::Provisions::lock(&alloc.indexer, &Self::account_id(), new_tokens - old_tokens)?;
      } else {
        T::Provisions::release(&alloc.indexer, &Self::account_id(), old_tokens - new_tokens)?;
      }
      alloc.tokens = new_tokens;
      Allocations::<T>::insert(&allocation_id, alloc);

      Self::deposit_event(Event::AllocationResized {
        allocation_id,
        old_tokens,
        new_tokens,
      });
      Ok(())
    }

    /// Present a proof of indexing and collect the rewards window it covers.
    ///
    /// A proof older than `MaxPoiStaleness` relative to the previous proof
    /// (or the allocation's creation) forfeits the window: nothing is minted
    /// but the timestamp and snapshot still reset.
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::present_poi())]
    pub fn present_poi(
      origin: OriginFor<T>,
      allocation_id: T::AccountId,
      poi: Poi,
    ) -> DispatchResult {
      let caller = ensure_signed(origin)?;
      let mut alloc =
        Allocations::<T>::get(&allocation_id).ok_or(Error::<T>::AllocationDoesNotExist)?;
      Self::ensure_indexer_or_operator(&caller, &alloc.indexer)?;
      ensure!(alloc.closed_at.is_none(), Error::<T>::AllocationAlreadyClosed);
      ensure!(poi != [0u8; 32], Error::<T>::InvalidZeroPoi);

      let now = frame_system::Pallet::<T>::block_number();
      let acc = T::Rewards::acc_rewards_per_allocated_token(alloc.deployment_id)?;
      let earned = fixed_math::mul_div(
        alloc.tokens,
        acc.saturating_sub(alloc.acc_rewards_per_allocated_token),
        FIXED_POINT_SCALE,
      )
      .ok_or(Error::<T>::ArithmeticOverflow)?;
      let accrued = alloc
        .acc_rewards_pending
        .checked_add(earned)
        .ok_or(Error::<T>::ArithmeticOverflow)?;

      let reference = alloc.last_poi_presented_at.unwrap_or(alloc.created_at);
      let fresh = now.saturating_sub(reference) <= T::MaxPoiStaleness::get();

      let mut rewards = 0;
      let mut delegation_rewards = 0;
      if fresh && accrued > 0 {
        delegation_rewards = T::DelegationCut::get().mul_floor(accrued);
        let indexer_rewards = accrued - delegation_rewards;
        if delegation_rewards > 0 {
          T::Currency::mint_into(
            &Self::delegation_pool_account(&alloc.indexer),
            delegation_rewards,
          )?;
        }
        if indexer_rewards > 0 {
          let destination = RewardsDestinations::<T>::get(&alloc.indexer)
            .unwrap_or_else(|| alloc.indexer.clone());
          T::Currency::mint_into(&destination, indexer_rewards)?;
        }
        rewards = accrued;
      }

      alloc.last_poi_presented_at = Some(now);
      alloc.acc_rewards_per_allocated_token = acc;
      alloc.acc_rewards_pending = 0;
      let deployment_id = alloc.deployment_id;
      Allocations::<T>::insert(&allocation_id, alloc);

      Self::deposit_event(Event::PoiPresented {
        allocation_id,
        deployment_id,
        poi,
        rewards,
        delegation_rewards,
      });
      Ok(())
    }

    /// Close an open allocation and release its provisioned stake.
    ///
    /// Closing never mints: rewards accrued since the last proof are only
    /// collectable through `present_poi` beforehand. The record stays on file
    /// so the id is burned forever.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::close_allocation())]
    pub fn close_allocation(origin: OriginFor<T>, allocation_id: T::AccountId) -> DispatchResult {
      let caller = ensure_signed(origin)?;
      let mut alloc =
        Allocations::<T>::get(&allocation_id).ok_or(Error::<T>::AllocationDoesNotExist)?;
      Self::ensure_indexer_or_operator(&caller, &alloc.indexer)?;
      ensure!(alloc.closed_at.is_none(), Error::<T>::AllocationAlreadyClosed);

      let deployment_total =
        SubgraphAllocatedTokens::<T>::get(alloc.deployment_id).saturating_sub(alloc.tokens);
      T::Rewards::on_deployment_update(alloc.deployment_id, deployment_total)?;
      SubgraphAllocatedTokens::<T>::insert(alloc.deployment_id, deployment_total);

      if alloc.tokens > 0 {
        T::Provisions::release(&alloc.indexer, &Self::account_id(), alloc.tokens)?;
      }

      alloc.closed_at = Some(frame_system::Pallet::<T>::block_number());
      let deployment_id = alloc.deployment_id;
      let tokens = alloc.tokens;
      Allocations::<T>::insert(&allocation_id, alloc);

      Self::deposit_event(Event::AllocationClosed {
        allocation_id,
        deployment_id,
        tokens,
      });
      Ok(())
    }

    /// Convert an imported legacy record into a closed allocation, once.
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::migrate_legacy_allocation())]
    pub fn migrate_legacy_allocation(
      origin: OriginFor<T>,
      allocation_id: T::AccountId,
    ) -> DispatchResult {
      ensure_signed(origin)?;
      let legacy =
        LegacyAllocations::<T>::get(&allocation_id).ok_or(Error::<T>::AllocationDoesNotExist)?;
      ensure!(
        !Allocations::<T>::contains_key(&allocation_id),
        Error::<T>::AllocationAlreadyExists
      );

      let now = frame_system::Pallet::<T>::block_number();
      Allocations::<T>::insert(
        &allocation_id,
        Allocation {
          indexer: legacy.indexer,
          deployment_id: legacy.deployment_id,
          tokens: legacy.tokens,
          created_at: now,
          closed_at: Some(now),
          last_poi_presented_at: None,
          acc_rewards_per_allocated_token: 0,
          acc_rewards_pending: 0,
        },
      );
      LegacyAllocations::<T>::remove(&allocation_id);

      Self::deposit_event(Event::LegacyAllocationMigrated { allocation_id });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// The pallet account, used as the provision consumer for all locks.
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Sub-account pooling the delegation share of an indexer's rewards.
    pub fn delegation_pool_account(indexer: &T::AccountId) -> T::AccountId {
      T::PalletId::get().into_sub_account_truncating((*b"dlgpol", indexer.clone()))
    }

    fn ensure_indexer_or_operator(
      caller: &T::AccountId,
      indexer: &T::AccountId,
    ) -> Result<(), DispatchError> {
      ensure!(
        caller == indexer || Operators::<T>::get(indexer, caller),
        Error::<T>::NotAuthorized
      );
      Ok(())
    }
  }

  impl<T: Config> AllocationInspector<T::AccountId> for Pallet<T> {
    fn allocation(allocation_id: &T::AccountId) -> Option<AllocationView<T::AccountId>> {
      Allocations::<T>::get(allocation_id).map(|alloc| AllocationView {
        indexer: alloc.indexer,
        deployment_id: alloc.deployment_id,
        tokens: alloc.tokens,
        is_open: alloc.closed_at.is_none(),
      })
    }
  }
}

/// Supplies valid ownership proofs when benchmarking against runtimes with
/// opaque signature schemes.
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn ownership_proof(indexer: &AccountId, allocation_id: &AccountId) -> [u8; 64];
  fn setup_provision(indexer: &AccountId, stake: primitives::Balance);
}
