use badgesweep_core::SeedSource;
use web_time::{SystemTime, UNIX_EPOCH};

/// Seeds from the wall clock and process id.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct ClockSeed;

impl SeedSource for ClockSeed {
    fn seed(&mut self) -> u64 {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        mix(nanos as u64 ^ (nanos >> 64) as u64 ^ u64::from(std::process::id()).rotate_left(32))
    }
}

/// splitmix64 finalizer, so close timestamps give unrelated seeds.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
