// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing behavior of series updates, run on a paused tokio clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use vizir_series::{
    CirclePackSpec, LayoutError, OrdinalScale, PackDatum, ScaleContinuous, ScaleLinear, ScaleLog,
    SizeAccessor,
};
use vizir_series_notify::{CirclePackSeries, LayoutNotifier, LayoutReport, NotifyError};

type Reports = Arc<Mutex<Vec<LayoutReport>>>;

fn series() -> (Reports, CirclePackSeries<&'static str, OrdinalScale<&'static str>>) {
    let seen: Reports = Arc::default();
    let sink = Arc::clone(&seen);
    let notifier = LayoutNotifier::new(move |report| sink.lock().unwrap().push(report)).unwrap();
    let series = CirclePackSeries::new(CirclePackSpec::new()).with_notifier(notifier);
    (seen, series)
}

fn x_scale() -> OrdinalScale<&'static str> {
    OrdinalScale::new(vec!["a", "b"], (0.0, 200.0)).unwrap()
}

fn y_scale() -> ScaleContinuous {
    ScaleLinear::new((-100.0, 100.0), (0.0, 1.0)).into()
}

fn records(n: usize) -> Arc<[PackDatum<&'static str>]> {
    (0..n)
        .map(|i| PackDatum::new(if i % 2 == 0 { "a" } else { "b" }))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn rapid_updates_report_once_with_the_last_extent() {
    let (seen, mut series) = series();
    let (x, y) = (x_scale(), y_scale());

    let mut last = None;
    for n in [2, 8, 20] {
        let layout = series
            .update(&records(n), Some(&x), Some(&y))
            .unwrap()
            .unwrap();
        last = layout.extent;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "three updates within the delay collapse to one report");
    let (lo, hi) = last.unwrap();
    assert_eq!(seen[0].range, (lo, hi));
    assert_eq!(seen[0].domain, (y.map(lo), y.map(hi)));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_series_cancels_the_report() {
    let (seen, mut series) = series();
    series
        .update(&records(6), Some(&x_scale()), Some(&y_scale()))
        .unwrap();
    drop(series);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(seen.lock().unwrap().is_empty(), "torn down before the delay");
}

#[tokio::test(start_paused = true)]
async fn explicit_cancel_drops_the_report() {
    let (seen, mut series) = series();
    series
        .update(&records(6), Some(&x_scale()), Some(&y_scale()))
        .unwrap();
    series.cancel_pending();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cached_updates_do_not_report_again() {
    let (seen, mut series) = series();
    let data = records(10);
    let (x, y) = (x_scale(), y_scale());

    series.update(&data, Some(&x), Some(&y)).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    series.update(&data, Some(&x), Some(&y)).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(seen.lock().unwrap().len(), 1, "second update was served from the cache");

    series.set_spec(CirclePackSpec::new().with_size(SizeAccessor::Constant(2.0)));
    series.update(&data, Some(&x), Some(&y)).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(seen.lock().unwrap().len(), 2, "spec change recomputes and reports");
}

#[tokio::test(start_paused = true)]
async fn empty_or_unready_updates_never_report() {
    let (seen, mut series) = series();
    let (x, y) = (x_scale(), y_scale());

    let empty = series.update(&records(0), Some(&x), Some(&y)).unwrap();
    assert!(empty.is_some_and(|layout| layout.circles.is_empty()));
    assert!(
        series
            .update(&records(4), None, Some(&y))
            .unwrap()
            .is_none(),
        "no x scale yet"
    );
    assert!(
        series
            .update(&records(4), Some(&x), None::<&ScaleContinuous>)
            .unwrap()
            .is_none(),
        "no y scale yet"
    );

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn empty_recomputation_supersedes_the_pending_report() {
    let (seen, mut series) = series();
    let (x, y) = (x_scale(), y_scale());

    series.update(&records(20), Some(&x), Some(&y)).unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    series.update(&records(0), Some(&x), Some(&y)).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(
        seen.lock().unwrap().is_empty(),
        "the report for the replaced layout must not fire"
    );
}

#[tokio::test(start_paused = true)]
async fn unmappable_extent_cancels_and_is_retried() {
    let (seen, mut series) = series();
    let x = x_scale();
    let linear = y_scale();
    let log: ScaleContinuous = ScaleLog::new((1.0, 100.0), (0.0, 1.0)).into();

    series.update(&records(6), Some(&x), Some(&linear)).unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;

    // Packed centers straddle zero, which a log scale cannot map.
    let data = records(20);
    let err = series.update(&data, Some(&x), Some(&log)).unwrap_err();
    assert!(
        matches!(err, NotifyError::Layout(LayoutError::OutOfDomain)),
        "unexpected error: {err:?}"
    );
    assert!(series.layout().is_none(), "unreported layout is not cached");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(seen.lock().unwrap().is_empty(), "stale report was cancelled");

    let layout = series
        .update(&data, Some(&x), Some(&linear))
        .unwrap()
        .unwrap();
    let (lo, hi) = layout.extent.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "retry recomputes and reports");
    assert_eq!(seen[0].range, (lo, hi));
}
