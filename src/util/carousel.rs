//! Image carousel index math for the listing detail page.

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

use crate::config::PLACEHOLDER_IMAGE;

/// Images to show for a listing: its own, or a single placeholder.
pub fn gallery_images(images: &[String]) -> Vec<String> {
    if images.is_empty() {
        vec![PLACEHOLDER_IMAGE.to_owned()]
    } else {
        images.to_vec()
    }
}

/// Current position within `len` images. Movement wraps in both directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn len(self) -> usize {
        self.len
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Prev/next controls and the counter only make sense with several images.
    pub fn has_controls(self) -> bool {
        self.len > 1
    }

    #[must_use]
    pub fn next(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self { index: (self.index + 1) % self.len, ..self }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self { index: (self.index + self.len - 1) % self.len, ..self }
    }

    /// Jump to a thumbnail. Out-of-range targets reset to the first image.
    #[must_use]
    pub fn select(self, index: usize) -> Self {
        Self { index, ..self }.clamped()
    }

    /// Adopt a new image count, resetting to 0 if the index fell off the end.
    #[must_use]
    pub fn resized(self, len: usize) -> Self {
        Self { len, ..self }.clamped()
    }

    /// `"i / n"` counter text, 1-based.
    pub fn counter(self) -> String {
        format!("{} / {}", self.index + 1, self.len)
    }

    fn clamped(self) -> Self {
        if self.index >= self.len { Self { index: 0, ..self } } else { self }
    }
}
