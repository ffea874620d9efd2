extern crate alloc;

use crate as pallet_rewards;
use polkadot_sdk::frame_support::{construct_runtime, derive_impl, traits::ConstU128};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
  BuildStorage,
};

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Rewards: pallet_rewards,
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

impl pallet_rewards::Config for Test {
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type MinIssuanceRate = ConstU128<{ primitives::params::MIN_ISSUANCE_RATE }>;
  type WeightInfo = ();
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  t.into()
}
