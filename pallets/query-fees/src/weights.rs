#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn collect() -> Weight;
	fn release_expired_stake() -> Weight;
	fn set_rebate_parameters() -> Weight;
	fn set_curation_cut() -> Weight;
	fn set_protocol_tax() -> Weight;
	fn set_stake_to_fees_ratio() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn collect() -> Weight {
		Weight::from_parts(120_000_000, 8000)
			.saturating_add(T::DbWeight::get().reads(16))
			.saturating_add(T::DbWeight::get().writes(10))
	}
	fn release_expired_stake() -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(T::DbWeight::get().reads(4))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn set_rebate_parameters() -> Weight {
		Weight::from_parts(15_000_000, 1000)
			.saturating_add(T::DbWeight::get().writes(4))
	}
	fn set_curation_cut() -> Weight {
		Weight::from_parts(10_000_000, 1000)
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_protocol_tax() -> Weight {
		Weight::from_parts(10_000_000, 1000)
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_stake_to_fees_ratio() -> Weight {
		Weight::from_parts(10_000_000, 1000)
			.saturating_add(T::DbWeight::get().writes(1))
	}
}

impl WeightInfo for () {
	fn collect() -> Weight {
		Weight::from_parts(120_000_000, 8000)
	}
	fn release_expired_stake() -> Weight {
		Weight::from_parts(40_000_000, 4000)
	}
	fn set_rebate_parameters() -> Weight {
		Weight::from_parts(15_000_000, 1000)
	}
	fn set_curation_cut() -> Weight {
		Weight::from_parts(10_000_000, 1000)
	}
	fn set_protocol_tax() -> Weight {
		Weight::from_parts(10_000_000, 1000)
	}
	fn set_stake_to_fees_ratio() -> Weight {
		Weight::from_parts(10_000_000, 1000)
	}
}
