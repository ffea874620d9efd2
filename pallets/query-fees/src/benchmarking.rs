#![cfg(feature = "runtime-benchmarks")]

use super::*;
use crate::pallet::{ReceiptAggregateVoucher, StakeClaims, TokensCollected};
use frame::deps::frame_support::traits::{fungible::Mutate, Get};
use frame::deps::sp_runtime::Permill;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::{self, RawOrigin};
use primitives::{params::FIXED_POINT_SCALE, PaymentTypes};

const TOKEN: u128 = FIXED_POINT_SCALE;
const DEPLOYMENT: [u8; 32] = [0xd1; 32];

fn prepared_voucher<T: Config>() -> (ReceiptAggregateVoucher<T::AccountId>, [u8; 64]) {
  let payer: T::AccountId = whitelisted_caller();
  let indexer: T::AccountId = account("indexer", 0, 0);
  let allocation_id: T::AccountId = account("allocation", 0, 0);

  T::Currency::mint_into(&payer, 10_000 * TOKEN).unwrap();
  T::BenchmarkHelper::setup_provision(&indexer, 10_000 * TOKEN);
  T::BenchmarkHelper::setup_allocation(&allocation_id, &indexer, DEPLOYMENT, 1_000 * TOKEN);

  let rav = ReceiptAggregateVoucher {
    payer,
    service_provider: indexer,
    allocation_id,
    value_aggregate: 100 * TOKEN,
  };
  let signature = T::BenchmarkHelper::rav_signature(&rav);
  (rav, signature)
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn collect() {
    let (rav, signature) = prepared_voucher::<T>();
    let caller = rav.payer.clone();

    #[extrinsic_call]
    collect(
      RawOrigin::Signed(caller),
      PaymentTypes::QueryFee,
      rav.clone(),
      signature,
    );

    assert_eq!(
      TokensCollected::<T>::get(&rav.service_provider, &rav.payer),
      100 * TOKEN
    );
  }

  #[benchmark]
  fn release_expired_stake() {
    let (rav, signature) = prepared_voucher::<T>();
    let caller = rav.payer.clone();
    let indexer = rav.service_provider.clone();
    Pallet::<T>::collect(
      RawOrigin::Signed(caller.clone()).into(),
      PaymentTypes::QueryFee,
      rav,
      signature,
    )
    .unwrap();
    frame_system::Pallet::<T>::set_block_number(
      frame_system::Pallet::<T>::block_number() + T::DisputePeriod::get() + 1u32.into(),
    );

    #[extrinsic_call]
    release_expired_stake(RawOrigin::Signed(caller), indexer.clone());

    assert!(StakeClaims::<T>::get(&indexer).is_empty());
  }

  #[benchmark]
  fn set_rebate_parameters() {
    #[extrinsic_call]
    set_rebate_parameters(RawOrigin::Root, 9, 10, 1, 2);
  }

  #[benchmark]
  fn set_curation_cut() {
    #[extrinsic_call]
    set_curation_cut(RawOrigin::Root, Permill::from_percent(20));
  }

  #[benchmark]
  fn set_protocol_tax() {
    #[extrinsic_call]
    set_protocol_tax(RawOrigin::Root, Permill::from_percent(2));
  }

  #[benchmark]
  fn set_stake_to_fees_ratio() {
    #[extrinsic_call]
    set_stake_to_fees_ratio(RawOrigin::Root, 5);
  }

  impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
