#![cfg(feature = "runtime-benchmarks")]

use super::*;
use crate::pallet::{Allocations, LegacyAllocation, LegacyAllocations};
use alloc::vec;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;
use primitives::params::FIXED_POINT_SCALE;

const TOKEN: u128 = FIXED_POINT_SCALE;
const DEPLOYMENT: [u8; 32] = [0xd1; 32];

fn registered_indexer<T: Config>() -> T::AccountId {
  let indexer: T::AccountId = whitelisted_caller();
  T::BenchmarkHelper::setup_provision(&indexer, 1_000 * TOKEN);
  Pallet::<T>::register(
    RawOrigin::Signed(indexer.clone()).into(),
    vec![b'u'; 16],
    vec![b'g'; 8],
  )
  .unwrap();
  indexer
}

fn open_allocation<T: Config>(indexer: &T::AccountId) -> T::AccountId {
  let allocation_id: T::AccountId = account("allocation", 0, 0);
  let proof = T::BenchmarkHelper::ownership_proof(indexer, &allocation_id);
  Pallet::<T>::start_allocation(
    RawOrigin::Signed(indexer.clone()).into(),
    indexer.clone(),
    DEPLOYMENT,
    100 * TOKEN,
    allocation_id.clone(),
    proof,
  )
  .unwrap();
  allocation_id
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn register() {
    let indexer: T::AccountId = whitelisted_caller();

    #[extrinsic_call]
    register(RawOrigin::Signed(indexer.clone()), vec![b'u'; 16], vec![b'g'; 8]);

    assert!(Indexers::<T>::contains_key(&indexer));
  }

  #[benchmark]
  fn set_operator() {
    let indexer = registered_indexer::<T>();
    let operator: T::AccountId = account("operator", 0, 0);

    #[extrinsic_call]
    set_operator(RawOrigin::Signed(indexer.clone()), operator.clone(), true);

    assert!(Operators::<T>::get(&indexer, &operator));
  }

  #[benchmark]
  fn set_rewards_destination() {
    let indexer = registered_indexer::<T>();
    let destination: T::AccountId = account("destination", 0, 0);

    #[extrinsic_call]
    set_rewards_destination(RawOrigin::Signed(indexer.clone()), Some(destination));
  }

  #[benchmark]
  fn start_allocation() {
    let indexer = registered_indexer::<T>();
    let allocation_id: T::AccountId = account("allocation", 0, 0);
    let proof = T::BenchmarkHelper::ownership_proof(&indexer, &allocation_id);

    #[extrinsic_call]
    start_allocation(
      RawOrigin::Signed(indexer.clone()),
      indexer.clone(),
      DEPLOYMENT,
      100 * TOKEN,
      allocation_id.clone(),
      proof,
    );

    assert!(Allocations::<T>::contains_key(&allocation_id));
  }

  #[benchmark]
  fn resize_allocation() {
    let indexer = registered_indexer::<T>();
    let allocation_id = open_allocation::<T>(&indexer);

    #[extrinsic_call]
    resize_allocation(RawOrigin::Signed(indexer), allocation_id.clone(), 200 * TOKEN);

    assert_eq!(
      Allocations::<T>::get(&allocation_id).unwrap().tokens,
      200 * TOKEN
    );
  }

  #[benchmark]
  fn present_poi() {
    let indexer = registered_indexer::<T>();
    let allocation_id = open_allocation::<T>(&indexer);

    #[extrinsic_call]
    present_poi(RawOrigin::Signed(indexer), allocation_id.clone(), [0x99; 32]);

    assert!(
      Allocations::<T>::get(&allocation_id)
        .unwrap()
        .last_poi_presented_at
        .is_some()
    );
  }

  #[benchmark]
  fn close_allocation() {
    let indexer = registered_indexer::<T>();
    let allocation_id = open_allocation::<T>(&indexer);

    #[extrinsic_call]
    close_allocation(RawOrigin::Signed(indexer), allocation_id.clone());

    assert!(
      Allocations::<T>::get(&allocation_id)
        .unwrap()
        .closed_at
        .is_some()
    );
  }

  #[benchmark]
  fn migrate_legacy_allocation() {
    let indexer: T::AccountId = account("indexer", 0, 0);
    let allocation_id: T::AccountId = account("allocation", 0, 0);
    LegacyAllocations::<T>::insert(
      &allocation_id,
      LegacyAllocation {
        indexer,
        deployment_id: DEPLOYMENT,
        tokens: 50 * TOKEN,
      },
    );
    let caller: T::AccountId = whitelisted_caller();

    #[extrinsic_call]
    migrate_legacy_allocation(RawOrigin::Signed(caller), allocation_id.clone());

    assert!(Allocations::<T>::contains_key(&allocation_id));
  }

  impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
