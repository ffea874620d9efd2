extern crate alloc;

use crate as pallet_allocation_manager;
use crate::pallet::OwnershipProofVerifier;
use codec::Encode;
use polkadot_sdk::frame_support::{
  construct_runtime, derive_impl, parameter_types,
  traits::{ConstU128, ConstU32, ConstU64},
  PalletId,
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
  BuildStorage, Permill,
};
use primitives::{pallet_ids, params, Balance, ProviderStake};
use std::cell::RefCell;
use std::collections::BTreeMap;

thread_local! {
    // Host staking registry: owner -> total provisioned stake
    pub static PROVISIONED_STAKE: RefCell<BTreeMap<u64, Balance>> = const { RefCell::new(BTreeMap::new()) };
}

/// Seed the mock staking registry for an owner.
pub fn set_provisioned_stake(owner: u64, stake: Balance) {
  PROVISIONED_STAKE.with(|s| s.borrow_mut().insert(owner, stake));
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    ProvisionTracker: pallet_provision_tracker,
    Rewards: pallet_rewards,
    AllocationManager: pallet_allocation_manager,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = u128;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

pub struct MockStakingProviders;
impl ProviderStake<u64> for MockStakingProviders {
  fn provisioned_stake(owner: &u64) -> Balance {
    PROVISIONED_STAKE.with(|s| s.borrow().get(owner).copied().unwrap_or(0))
  }
}

impl pallet_provision_tracker::Config for Test {
  type StakingProviders = MockStakingProviders;
}

impl pallet_rewards::Config for Test {
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type MinIssuanceRate = ConstU128<{ params::MIN_ISSUANCE_RATE }>;
  type WeightInfo = ();
}

/// Deterministic proofs for tests: the double blake2 of the pair encoding.
pub fn valid_proof(indexer: &u64, allocation_id: &u64) -> [u8; 64] {
  let digest = polkadot_sdk::sp_io::hashing::blake2_256(&(indexer, allocation_id).encode());
  let mut proof = [0u8; 64];
  proof[..32].copy_from_slice(&digest);
  proof[32..].copy_from_slice(&polkadot_sdk::sp_io::hashing::blake2_256(&digest));
  proof
}

pub struct MockOwnershipProof;
impl OwnershipProofVerifier<u64> for MockOwnershipProof {
  fn verify(indexer: &u64, allocation_id: &u64, proof: &[u8; 64]) -> bool {
    *proof == valid_proof(indexer, allocation_id)
  }
}

parameter_types! {
  pub const AllocationManagerPalletId: PalletId =
    PalletId(*pallet_ids::ALLOCATION_MANAGER_PALLET_ID);
  pub const TestDelegationCut: Permill = params::DEFAULT_DELEGATION_CUT;
}

impl pallet_allocation_manager::Config for Test {
  type Currency = Balances;
  type Provisions = ProvisionTracker;
  type Rewards = Rewards;
  type OwnershipProof = MockOwnershipProof;
  type PalletId = AllocationManagerPalletId;
  type MaxPoiStaleness = ConstU64<100>;
  type DelegationCut = TestDelegationCut;
  type MaxMetadataLength = ConstU32<256>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = MockBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;
#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<u64> for MockBenchmarkHelper {
  fn ownership_proof(indexer: &u64, allocation_id: &u64) -> [u8; 64] {
    valid_proof(indexer, allocation_id)
  }
  fn setup_provision(indexer: &u64, stake: Balance) {
    set_provisioned_stake(*indexer, stake);
  }
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  PROVISIONED_STAKE.with(|s| s.borrow_mut().clear());

  t.into()
}

/// Externalities with legacy allocations seeded at genesis.
pub fn new_test_ext_with_legacy(
  legacy: Vec<(u64, u64, primitives::DeploymentId, Balance)>,
) -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  pallet_allocation_manager::GenesisConfig::<Test> {
    legacy_allocations: legacy,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  PROVISIONED_STAKE.with(|s| s.borrow_mut().clear());

  t.into()
}
