#![cfg(feature = "runtime-benchmarks")]

use super::*;
use crate::pallet::{AccumulatedRewards, IssuanceRate};
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;
use primitives::params::FIXED_POINT_SCALE;

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn set_issuance_rate() {
    let new_rate: u128 = FIXED_POINT_SCALE + FIXED_POINT_SCALE / 100;

    #[extrinsic_call]
    set_issuance_rate(RawOrigin::Root, new_rate);

    assert_eq!(IssuanceRate::<T>::get(), new_rate);
  }

  #[benchmark]
  fn set_issuance_base() {
    // Worst case: an elapsed window has to be snapshotted first.
    Pallet::<T>::set_issuance_rate(
      RawOrigin::Root.into(),
      FIXED_POINT_SCALE + FIXED_POINT_SCALE / 100,
    )
    .unwrap();
    let new_base: u128 = 1_000 * FIXED_POINT_SCALE;

    #[extrinsic_call]
    set_issuance_base(RawOrigin::Root, new_base);

    assert_eq!(AccumulatedRewards::<T>::get(), 0);
  }

  impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
