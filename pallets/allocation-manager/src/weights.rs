#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn register() -> Weight;
	fn set_operator() -> Weight;
	fn set_rewards_destination() -> Weight;
	fn start_allocation() -> Weight;
	fn resize_allocation() -> Weight;
	fn present_poi() -> Weight;
	fn close_allocation() -> Weight;
	fn migrate_legacy_allocation() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn register() -> Weight {
		Weight::from_parts(25_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_operator() -> Weight {
		Weight::from_parts(20_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_rewards_destination() -> Weight {
		Weight::from_parts(20_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn start_allocation() -> Weight {
		Weight::from_parts(80_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(12))
			.saturating_add(T::DbWeight::get().writes(9))
	}
	fn resize_allocation() -> Weight {
		Weight::from_parts(80_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(11))
			.saturating_add(T::DbWeight::get().writes(9))
	}
	fn present_poi() -> Weight {
		Weight::from_parts(90_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(12))
			.saturating_add(T::DbWeight::get().writes(9))
	}
	fn close_allocation() -> Weight {
		Weight::from_parts(80_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(11))
			.saturating_add(T::DbWeight::get().writes(9))
	}
	fn migrate_legacy_allocation() -> Weight {
		Weight::from_parts(30_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(2))
	}
}

impl WeightInfo for () {
	fn register() -> Weight {
		Weight::from_parts(25_000_000, 3000)
	}
	fn set_operator() -> Weight {
		Weight::from_parts(20_000_000, 3000)
	}
	fn set_rewards_destination() -> Weight {
		Weight::from_parts(20_000_000, 3000)
	}
	fn start_allocation() -> Weight {
		Weight::from_parts(80_000_000, 6000)
	}
	fn resize_allocation() -> Weight {
		Weight::from_parts(80_000_000, 6000)
	}
	fn present_poi() -> Weight {
		Weight::from_parts(90_000_000, 6000)
	}
	fn close_allocation() -> Weight {
		Weight::from_parts(80_000_000, 6000)
	}
	fn migrate_legacy_allocation() -> Weight {
		Weight::from_parts(30_000_000, 3000)
	}
}
