#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use widervoc::codes::AttributeCodes;
use widervoc::wider::WiderBox;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_codes() -> impl Strategy<Value = AttributeCodes> {
    (0u32..3, 0u32..2, 0u32..2, 0u32..2, 0u32..3, 0u32..2).prop_map(
        |(blur, expression, illumination, invalid, occlusion, pose)| AttributeCodes {
            blur,
            expression,
            illumination,
            invalid,
            occlusion,
            pose,
        },
    )
}

pub fn arb_box() -> impl Strategy<Value = WiderBox> {
    (0i32..=i32::MAX, 0i32..=i32::MAX, any::<u32>(), any::<u32>(), arb_codes()).prop_map(
        |(x, y, width, height, codes)| WiderBox {
            x,
            y,
            width,
            height,
            codes,
        },
    )
}

/// Render a box the way it appears in a WIDER FACE ground-truth file.
pub fn box_line(wider_box: &WiderBox) -> String {
    let c = &wider_box.codes;
    format!(
        "{} {} {} {} {} {} {} {} {} {}",
        wider_box.x,
        wider_box.y,
        wider_box.width,
        wider_box.height,
        c.blur,
        c.expression,
        c.illumination,
        c.invalid,
        c.occlusion,
        c.pose
    )
}

/// Image identifiers shaped like `<n>--<Event>/<n>_<Event>_<k>.jpg`.
pub fn arb_image_path() -> impl Strategy<Value = String> {
    (0u32..62, "[A-Za-z]{1,10}", 0u32..1000)
        .prop_map(|(n, event, k)| format!("{n}--{event}/{n}_{event}_{k}.jpg"))
}
