extern crate alloc;

use crate as pallet_provision_tracker;
use polkadot_sdk::frame_support::{construct_runtime, derive_impl};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
  BuildStorage,
};
use primitives::{Balance, ProviderStake};
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
    ProvisionTracker: pallet_provision_tracker,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
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

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  PROVISIONED_STAKE.with(|s| s.borrow_mut().clear());

  t.into()
}
