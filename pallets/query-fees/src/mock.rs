extern crate alloc;

use crate as pallet_query_fees;
use crate::pallet::{RavVerifier, ReceiptAggregateVoucher};
use codec::Encode;
use polkadot_sdk::frame_support::traits::{
  fungible::Mutate,
  tokens::Preservation,
};
use polkadot_sdk::frame_support::{
  construct_runtime, derive_impl, parameter_types,
  traits::{ConstU128, ConstU32, ConstU64},
  PalletId,
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
  BuildStorage, DispatchError, Permill,
};
use primitives::{
  pallet_ids, params, AllocationInspector, AllocationView, Balance, CurationDeposit,
  DeploymentId, ProviderStake,
};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Fixed sink account standing in for a curation module.
pub const CURATION_POOL: u64 = 999;

thread_local! {
    // Host staking registry: owner -> total provisioned stake
    pub static PROVISIONED_STAKE: RefCell<BTreeMap<u64, Balance>> = const { RefCell::new(BTreeMap::new()) };
    // Allocation records the inspector serves: id -> view
    pub static ALLOCATIONS: RefCell<BTreeMap<u64, AllocationView<u64>>> = const { RefCell::new(BTreeMap::new()) };
    // Curation deposits observed, per deployment
    pub static CURATION_DEPOSITS: RefCell<BTreeMap<DeploymentId, Balance>> = const { RefCell::new(BTreeMap::new()) };
}

/// Seed the mock staking registry for an owner.
pub fn set_provisioned_stake(owner: u64, stake: Balance) {
  PROVISIONED_STAKE.with(|s| s.borrow_mut().insert(owner, stake));
}

/// Seed an allocation record served through the inspector.
pub fn set_allocation(
  allocation_id: u64,
  indexer: u64,
  deployment_id: DeploymentId,
  tokens: Balance,
  is_open: bool,
) {
  ALLOCATIONS.with(|a| {
    a.borrow_mut().insert(
      allocation_id,
      AllocationView {
        indexer,
        deployment_id,
        tokens,
        is_open,
      },
    )
  });
}

pub fn curation_deposits(deployment: DeploymentId) -> Balance {
  CURATION_DEPOSITS.with(|c| c.borrow().get(&deployment).copied().unwrap_or(0))
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    ProvisionTracker: pallet_provision_tracker,
    QueryFees: pallet_query_fees,
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

pub struct MockAllocations;
impl AllocationInspector<u64> for MockAllocations {
  fn allocation(allocation_id: &u64) -> Option<AllocationView<u64>> {
    ALLOCATIONS.with(|a| a.borrow().get(allocation_id).cloned())
  }
}

pub struct MockCuration;
impl CurationDeposit<u64> for MockCuration {
  fn deposit(from: &u64, deployment: DeploymentId, amount: Balance) -> Result<(), DispatchError> {
    <Balances as Mutate<u64>>::transfer(from, &CURATION_POOL, amount, Preservation::Expendable)?;
    CURATION_DEPOSITS.with(|c| {
      let mut deposits = c.borrow_mut();
      let entry = deposits.entry(deployment).or_insert(0);
      *entry += amount;
    });
    Ok(())
  }
}

/// Deterministic signatures for tests: the double blake2 of the voucher.
pub fn valid_rav_signature(rav: &ReceiptAggregateVoucher<u64>) -> [u8; 64] {
  let digest = polkadot_sdk::sp_io::hashing::blake2_256(&rav.encode());
  let mut signature = [0u8; 64];
  signature[..32].copy_from_slice(&digest);
  signature[32..].copy_from_slice(&polkadot_sdk::sp_io::hashing::blake2_256(&digest));
  signature
}

pub struct MockRavVerifier;
impl RavVerifier<u64> for MockRavVerifier {
  fn verify(rav: &ReceiptAggregateVoucher<u64>, signature: &[u8; 64]) -> bool {
    *signature == valid_rav_signature(rav)
  }
}

parameter_types! {
  pub const QueryFeesPalletId: PalletId = PalletId(*pallet_ids::QUERY_FEES_PALLET_ID);
  pub const TestCurationCut: Permill = params::DEFAULT_CURATION_CUT;
  pub const TestProtocolTax: Permill = params::DEFAULT_PROTOCOL_TAX;
}

impl pallet_query_fees::Config for Test {
  type Currency = Balances;
  type Allocations = MockAllocations;
  type Provisions = ProvisionTracker;
  type Curation = MockCuration;
  type RavVerifier = MockRavVerifier;
  type PalletId = QueryFeesPalletId;
  type DisputePeriod = ConstU64<50>;
  type MaxPendingStakeClaims = ConstU32<4>;
  type DefaultAlphaNumerator = ConstU32<{ params::DEFAULT_ALPHA_NUMERATOR }>;
  type DefaultAlphaDenominator = ConstU32<{ params::DEFAULT_ALPHA_DENOMINATOR }>;
  type DefaultLambdaNumerator = ConstU32<{ params::DEFAULT_LAMBDA_NUMERATOR }>;
  type DefaultLambdaDenominator = ConstU32<{ params::DEFAULT_LAMBDA_DENOMINATOR }>;
  type DefaultCurationCut = TestCurationCut;
  type DefaultProtocolTax = TestProtocolTax;
  type DefaultStakeToFeesRatio = ConstU128<{ params::DEFAULT_STAKE_TO_FEES_RATIO }>;
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = MockBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;
#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<u64> for MockBenchmarkHelper {
  fn setup_allocation(allocation_id: &u64, indexer: &u64, deployment: DeploymentId, tokens: Balance) {
    set_allocation(*allocation_id, *indexer, deployment, tokens, true);
  }
  fn setup_provision(indexer: &u64, stake: Balance) {
    set_provisioned_stake(*indexer, stake);
  }
  fn rav_signature(rav: &ReceiptAggregateVoucher<u64>) -> [u8; 64] {
    valid_rav_signature(rav)
  }
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  pallet_query_fees::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();

  PROVISIONED_STAKE.with(|s| s.borrow_mut().clear());
  ALLOCATIONS.with(|a| a.borrow_mut().clear());
  CURATION_DEPOSITS.with(|c| c.borrow_mut().clear());

  t.into()
}
