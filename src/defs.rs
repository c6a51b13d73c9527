use once_cell::sync::Lazy;

use crate::die::Die;

static D4: Lazy<Die> = Lazy::new(|| regular(4));
static D6: Lazy<Die> = Lazy::new(|| regular(6));
static D8: Lazy<Die> = Lazy::new(|| regular(8));
static D10: Lazy<Die> = Lazy::new(|| regular(10));
static D12: Lazy<Die> = Lazy::new(|| regular(12));
static D20: Lazy<Die> = Lazy::new(|| regular(20));
static D100: Lazy<Die> = Lazy::new(|| regular(100));
static COIN: Lazy<Die> = Lazy::new(|| Die::numeric([0, 1]).expect("sides are numbers"));

fn regular(sides_count: u32) -> Die {
    Die::regular(sides_count).expect("positive side count")
}

pub fn d4() -> Die {
    D4.clone()
}

pub fn d6() -> Die {
    D6.clone()
}

pub fn d8() -> Die {
    D8.clone()
}

pub fn d10() -> Die {
    D10.clone()
}

pub fn d12() -> Die {
    D12.clone()
}

pub fn d20() -> Die {
    D20.clone()
}

pub fn d100() -> Die {
    D100.clone()
}

/// A fair coin with sides 0 and 1.
pub fn coin() -> Die {
    COIN.clone()
}
