//! Growable stage buffers with a capacity-doubling policy.
//!
//! Both buffers reserve fallibly, so running out of memory surfaces as
//! `CodecError::AllocationFailure` instead of an abort.

use hr_core::{CodecError, Result};

/// Smallest power-of-two multiple of `capacity` that holds `required`.
pub fn doubled_capacity(capacity: usize, required: usize) -> Option<usize> {
    let mut next = capacity.max(1);
    while next < required {
        next = next.checked_mul(2)?;
    }
    Some(next)
}

/// ASCII text buffer used for bit-strings and RLE output.
#[derive(Debug, Default)]
pub struct TextBuffer {
    inner: String,
    what: &'static str,
}

impl TextBuffer {
    pub fn with_capacity(what: &'static str, capacity: usize) -> Result<Self> {
        let mut inner = String::new();
        inner
            .try_reserve_exact(capacity)
            .map_err(|_| CodecError::alloc(what, capacity))?;
        Ok(Self { inner, what })
    }

    fn ensure(&mut self, additional: usize) -> Result<()> {
        let required = self
            .inner
            .len()
            .checked_add(additional)
            .ok_or_else(|| CodecError::alloc(self.what, usize::MAX))?;
        if required <= self.inner.capacity() {
            return Ok(());
        }
        let target = doubled_capacity(self.inner.capacity(), required)
            .ok_or_else(|| CodecError::alloc(self.what, required))?;
        self.inner
            .try_reserve_exact(target - self.inner.len())
            .map_err(|_| CodecError::alloc(self.what, target))
    }

    pub fn push(&mut self, c: char) -> Result<()> {
        self.ensure(c.len_utf8())?;
        self.inner.push(c);
        Ok(())
    }

    pub fn push_str(&mut self, s: &str) -> Result<()> {
        self.ensure(s.len())?;
        self.inner.push_str(s);
        Ok(())
    }

    /// Append `s` `count` times, growing once up front.
    pub fn push_repeated(&mut self, s: &str, count: usize) -> Result<()> {
        let additional = s
            .len()
            .checked_mul(count)
            .ok_or_else(|| CodecError::alloc(self.what, usize::MAX))?;
        self.ensure(additional)?;
        for _ in 0..count {
            self.inner.push_str(s);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn into_string(self) -> String {
        self.inner
    }
}

/// Raw byte buffer used for reconstructed text.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    inner: Vec<u8>,
    what: &'static str,
}

impl ByteBuffer {
    pub fn with_capacity(what: &'static str, capacity: usize) -> Result<Self> {
        let mut inner = Vec::new();
        inner
            .try_reserve_exact(capacity)
            .map_err(|_| CodecError::alloc(what, capacity))?;
        Ok(Self { inner, what })
    }

    pub fn push(&mut self, byte: u8) -> Result<()> {
        if self.inner.len() == self.inner.capacity() {
            let required = self.inner.len() + 1;
            let target = doubled_capacity(self.inner.capacity(), required)
                .ok_or_else(|| CodecError::alloc(self.what, required))?;
            self.inner
                .try_reserve_exact(target - self.inner.len())
                .map_err(|_| CodecError::alloc(self.what, target))?;
        }
        self.inner.push(byte);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.inner
    }
}
