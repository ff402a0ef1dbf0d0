//! Explicit little-endian record encoding shared by encoder and decoder.

use crate::layout::{Rect, Stats};
use crate::tree::{Item, ItemId};

/// `id i64, x f64, y f64, width f64, height f64`
pub const RECT_RECORD_SIZE: usize = 40;
/// `min f64, max f64, sum f64, count u64`
pub const STATS_RECORD_SIZE: usize = 32;
/// `id i64, parent_id i64, weight f64, children_offset_index u32, children_count u32`,
/// followed by the per-item user data trailer.
pub const ITEM_RECORD_SIZE: usize = 32;

/// Cursor over an output slice whose length was checked up front.
pub(crate) struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn bytes(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    pub(crate) fn u8(&mut self, v: u8) {
        self.bytes(&[v]);
    }

    pub(crate) fn u32(&mut self, v: u32) {
        self.bytes(&v.to_le_bytes());
    }

    pub(crate) fn u64(&mut self, v: u64) {
        self.bytes(&v.to_le_bytes());
    }

    pub(crate) fn i64(&mut self, v: i64) {
        self.bytes(&v.to_le_bytes());
    }

    pub(crate) fn f64(&mut self, v: f64) {
        self.bytes(&v.to_le_bytes());
    }

    pub(crate) fn rect(&mut self, r: &Rect) {
        self.i64(r.id.0);
        self.f64(r.x);
        self.f64(r.y);
        self.f64(r.width);
        self.f64(r.height);
    }

    pub(crate) fn stats(&mut self, s: &Stats) {
        self.f64(s.min);
        self.f64(s.max);
        self.f64(s.sum);
        self.u64(s.count);
    }

    pub(crate) fn item(&mut self, item: &Item) {
        self.i64(item.id.0);
        self.i64(item.parent_id.0);
        self.f64(item.weight);
        self.u32(item.children_offset_index);
        self.u32(item.children_count);
        self.bytes(&item.user_data);
    }
}

/// Cursor over an input slice whose length was checked up front.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn take(&mut self, n: usize) -> &'a [u8] {
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        out
    }

    pub(crate) fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N));
        out
    }

    pub(crate) fn u8(&mut self) -> u8 {
        self.array::<1>()[0]
    }

    pub(crate) fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.array())
    }

    pub(crate) fn u64(&mut self) -> u64 {
        u64::from_le_bytes(self.array())
    }

    pub(crate) fn i64(&mut self) -> i64 {
        i64::from_le_bytes(self.array())
    }

    pub(crate) fn f64(&mut self) -> f64 {
        f64::from_le_bytes(self.array())
    }

    pub(crate) fn rect(&mut self) -> Rect {
        Rect {
            id: ItemId(self.i64()),
            x: self.f64(),
            y: self.f64(),
            width: self.f64(),
            height: self.f64(),
        }
    }

    pub(crate) fn stats(&mut self) -> Stats {
        Stats {
            min: self.f64(),
            max: self.f64(),
            sum: self.f64(),
            count: self.u64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_record_layout_is_little_endian() {
        let mut buf = [0u8; RECT_RECORD_SIZE];
        let mut w = Writer::new(&mut buf);
        w.rect(&Rect::new(0x0102, 1.0, 0.0, 0.0, 0.0));
        assert_eq!(w.position(), RECT_RECORD_SIZE);

        assert_eq!(&buf[0..8], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&buf[8..16], &1.0f64.to_le_bytes());
    }

    #[test]
    fn item_record_is_fixed_size_plus_trailer() {
        let item = Item::new(5, 1, 2.5).with_user_data(vec![9, 8, 7]);
        let mut buf = [0u8; ITEM_RECORD_SIZE + 3];
        let mut w = Writer::new(&mut buf);
        w.item(&item);
        assert_eq!(w.position(), ITEM_RECORD_SIZE + 3);
        assert_eq!(&buf[ITEM_RECORD_SIZE..], &[9, 8, 7]);

        let mut r = Reader::new(&buf);
        assert_eq!(r.i64(), 5);
        assert_eq!(r.i64(), 1);
        assert_eq!(r.f64(), 2.5);
    }
}
