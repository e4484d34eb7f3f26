// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload handed to pointer callbacks by renderers of series geometry.

/// A pointer event on one glyph of a series.
///
/// Layouts do not build these; they expose the `index` (or `source_index`) a renderer needs to
/// assemble one when it wires its own pointer events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesEvent<'a, D, E> {
    /// The host's native event.
    pub event: E,
    /// The whole series.
    pub data: &'a [D],
    /// The record under the pointer.
    pub datum: &'a D,
    /// Index of `datum` in `data`.
    pub index: usize,
}

impl<'a, D, E> SeriesEvent<'a, D, E> {
    /// Builds an event for the record at `index`, or `None` if `index` is out of bounds.
    pub fn new(event: E, data: &'a [D], index: usize) -> Option<Self> {
        let datum = data.get(index)?;
        Some(Self {
            event,
            data,
            datum,
            index,
        })
    }
}
