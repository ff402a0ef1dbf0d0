//! Binary model format.
//!
//! ```text
//! 0   "TMV\0"
//! 4   version, 3 zero bytes
//! 8   u32 area record size
//! 12  u32 stats record size
//! 16  u32 items block size
//! 20  u32 rects block size
//! 24  u32 items count
//! 28  u32 per-item user data size
//! 32  u32 rects count
//! 36  area record, stats record, item records, rect records
//! ```
//!
//! Every field is written explicitly in little-endian order, so buffers are
//! portable between hosts.

pub mod wire;

use crate::error::CodecError;
use crate::layout::{Model, Rect, RectBuffer, Stats};
use crate::tree::{Item, ItemId};

use self::wire::{Reader, Writer, ITEM_RECORD_SIZE, RECT_RECORD_SIZE, STATS_RECORD_SIZE};

pub const MAGIC: [u8; 4] = *b"TMV\0";
pub const VERSION: u8 = 1;
pub const HEADER_SIZE: usize = 36;

/// Total bytes [`encode`] writes for `model`.
pub fn encoded_len(model: &Model) -> usize {
    let item_size = ITEM_RECORD_SIZE + model.items_user_data_size as usize;
    HEADER_SIZE
        + RECT_RECORD_SIZE
        + STATS_RECORD_SIZE
        + model.items.len().saturating_mul(item_size)
        + model.rects.len().saturating_mul(RECT_RECORD_SIZE)
}

/// Encode `model` and the `area` it was laid out in into `out`.
///
/// Returns the number of bytes written. Nothing is written when the buffer is
/// too small or the model cannot be represented.
pub fn encode(model: &Model, area: &Rect, out: &mut [u8]) -> Result<usize, CodecError> {
    let user_data_size = model.items_user_data_size as usize;
    if let Some(item) = model
        .items
        .iter()
        .find(|item| item.user_data.len() != user_data_size)
    {
        return Err(CodecError::UserDataSize {
            id: item.id,
            expected: user_data_size,
            actual: item.user_data.len(),
        });
    }

    let items_block = model
        .items
        .len()
        .checked_mul(ITEM_RECORD_SIZE + user_data_size)
        .ok_or(CodecError::TooLarge {
            block: "items",
            size: usize::MAX,
        })?;
    let rects_block = model
        .rects
        .len()
        .checked_mul(RECT_RECORD_SIZE)
        .ok_or(CodecError::TooLarge {
            block: "rects",
            size: usize::MAX,
        })?;

    let header = [
        RECT_RECORD_SIZE as u32,
        STATS_RECORD_SIZE as u32,
        fit_u32("items", items_block)?,
        fit_u32("rects", rects_block)?,
        fit_u32("items count", model.items.len())?,
        model.items_user_data_size,
        fit_u32("rects count", model.rects.len())?,
    ];

    let required = encoded_len(model);
    if out.len() < required {
        return Err(CodecError::BufferTooSmall {
            required,
            capacity: out.len(),
        });
    }

    let mut w = Writer::new(out);
    w.bytes(&MAGIC);
    w.u8(VERSION);
    w.bytes(&[0, 0, 0]);
    for field in header {
        w.u32(field);
    }
    w.rect(area);
    w.stats(&model.stats);
    for item in &model.items {
        w.item(item);
    }
    for rect in model.rects.iter() {
        w.rect(rect);
    }

    debug_assert_eq!(w.position(), required);
    tracing::debug!(
        "Encoded {} items and {} rects into {} bytes",
        model.items.len(),
        model.rects.len(),
        required
    );
    Ok(required)
}

/// Encode into a freshly allocated buffer of exactly [`encoded_len`] bytes.
pub fn encode_to_vec(model: &Model, area: &Rect) -> Result<Vec<u8>, CodecError> {
    let mut buf = vec![0u8; encoded_len(model)];
    let written = encode(model, area, &mut buf)?;
    buf.truncate(written);
    Ok(buf)
}

fn fit_u32(block: &'static str, size: usize) -> Result<u32, CodecError> {
    u32::try_from(size).map_err(|_| CodecError::TooLarge { block, size })
}

/// Validate `bytes` and return a view that decodes records on demand.
pub fn decode(bytes: &[u8]) -> Result<ModelView<'_>, CodecError> {
    if bytes.len() < HEADER_SIZE {
        return Err(CodecError::Truncated {
            needed: HEADER_SIZE,
            actual: bytes.len(),
        });
    }

    let mut r = Reader::new(bytes);
    let magic: [u8; 4] = r.array();
    if magic != MAGIC {
        return Err(CodecError::BadMagic(magic));
    }
    let version = r.u8();
    if version != VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }
    let padding: [u8; 3] = r.array();
    if padding != [0; 3] {
        return Err(CodecError::BadPadding(padding));
    }

    let area_size = r.u32() as usize;
    let stats_size = r.u32() as usize;
    let items_block = r.u32() as usize;
    let rects_block = r.u32() as usize;
    let items_count = r.u32() as usize;
    let items_user_data_size = r.u32();
    let rects_count = r.u32() as usize;

    if area_size != RECT_RECORD_SIZE {
        return Err(CodecError::RecordSize {
            record: "area",
            expected: RECT_RECORD_SIZE,
            actual: area_size,
        });
    }
    if stats_size != STATS_RECORD_SIZE {
        return Err(CodecError::RecordSize {
            record: "stats",
            expected: STATS_RECORD_SIZE,
            actual: stats_size,
        });
    }

    let item_size = ITEM_RECORD_SIZE + items_user_data_size as usize;
    check_block("items", items_count.checked_mul(item_size), items_block)?;
    check_block("rects", rects_count.checked_mul(RECT_RECORD_SIZE), rects_block)?;

    let needed = [area_size, stats_size, items_block, rects_block]
        .iter()
        .try_fold(HEADER_SIZE, |acc, &n| acc.checked_add(n))
        .ok_or(CodecError::TooLarge {
            block: "model",
            size: usize::MAX,
        })?;
    if bytes.len() < needed {
        return Err(CodecError::Truncated {
            needed,
            actual: bytes.len(),
        });
    }

    let area = r.rect();
    let stats = r.stats();
    let items = r.take(items_block);
    let rects = r.take(rects_block);

    Ok(ModelView {
        area,
        stats,
        items_user_data_size,
        items,
        rects,
    })
}

fn check_block(
    block: &'static str,
    expected: Option<usize>,
    actual: usize,
) -> Result<(), CodecError> {
    match expected {
        Some(expected) if expected == actual => Ok(()),
        Some(expected) => Err(CodecError::BlockSize {
            block,
            expected,
            actual,
        }),
        None => Err(CodecError::TooLarge {
            block,
            size: usize::MAX,
        }),
    }
}

/// Decode `bytes` into `model`, returning the encoded area.
///
/// On any error `model` is left exactly as it was.
pub fn decode_into(model: &mut Model, bytes: &[u8]) -> Result<Rect, CodecError> {
    let view = decode(bytes)?;
    *model = view.to_model();
    Ok(view.area())
}

/// Borrowed view over a validated buffer. Records are decoded when accessed.
#[derive(Debug, Clone, Copy)]
pub struct ModelView<'a> {
    area: Rect,
    stats: Stats,
    items_user_data_size: u32,
    items: &'a [u8],
    rects: &'a [u8],
}

impl<'a> ModelView<'a> {
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn items_user_data_size(&self) -> u32 {
        self.items_user_data_size
    }

    fn item_size(&self) -> usize {
        ITEM_RECORD_SIZE + self.items_user_data_size as usize
    }

    pub fn items_len(&self) -> usize {
        self.items.len() / self.item_size()
    }

    pub fn rects_len(&self) -> usize {
        self.rects.len() / RECT_RECORD_SIZE
    }

    pub fn item(&self, index: usize) -> Option<ItemRecord<'a>> {
        let size = self.item_size();
        let start = index.checked_mul(size)?;
        let end = start.checked_add(size)?;
        self.items.get(start..end).map(ItemRecord::parse)
    }

    pub fn rect(&self, index: usize) -> Option<Rect> {
        let start = index.checked_mul(RECT_RECORD_SIZE)?;
        let end = start.checked_add(RECT_RECORD_SIZE)?;
        self.rects
            .get(start..end)
            .map(|chunk| Reader::new(chunk).rect())
    }

    pub fn items(&self) -> impl ExactSizeIterator<Item = ItemRecord<'a>> + 'a {
        self.items
            .chunks_exact(self.item_size())
            .map(ItemRecord::parse)
    }

    pub fn rects(&self) -> impl ExactSizeIterator<Item = Rect> + 'a {
        self.rects
            .chunks_exact(RECT_RECORD_SIZE)
            .map(|chunk| Reader::new(chunk).rect())
    }

    /// Owned model; the items keep their encoded (organized) order.
    pub fn to_model(&self) -> Model {
        let items: Vec<Item> = self.items().map(|rec| rec.to_item()).collect();
        let rects: Vec<Rect> = self.rects().collect();
        let capacity = items.len();
        Model::from_parts(
            items,
            RectBuffer::from_rects(rects, capacity),
            self.stats,
            self.items_user_data_size,
        )
    }
}

/// One item record borrowed from an encoded buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemRecord<'a> {
    pub id: ItemId,
    pub parent_id: ItemId,
    pub weight: f64,
    pub children_offset_index: u32,
    pub children_count: u32,
    pub user_data: &'a [u8],
}

impl<'a> ItemRecord<'a> {
    fn parse(chunk: &'a [u8]) -> Self {
        let mut r = Reader::new(chunk);
        let id = ItemId(r.i64());
        let parent_id = ItemId(r.i64());
        let weight = r.f64();
        let children_offset_index = r.u32();
        let children_count = r.u32();
        Self {
            id,
            parent_id,
            weight,
            children_offset_index,
            children_count,
            user_data: &chunk[ITEM_RECORD_SIZE..],
        }
    }

    pub fn to_item(&self) -> Item {
        Item {
            id: self.id,
            parent_id: self.parent_id,
            weight: self.weight,
            children_offset_index: self.children_offset_index,
            children_count: self.children_count,
            user_data: self.user_data.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;

    fn nested_model() -> Model {
        let mut items = vec![
            Item::root(1, 10.0),
            Item::root(2, 10.0),
            Item::root(3, 10.0),
            Item::root(4, 10.0),
        ];
        items.extend((5..=8).map(|id| Item::new(id, 1, 2.5)));
        let mut model = Model::new(items);
        layout(&mut model, Rect::new(99, 0.0, 0.0, 100.0, 100.0)).unwrap();
        model
    }

    #[test]
    fn header_fields_are_explicit() {
        let model = nested_model();
        let area = Rect::new(99, 0.0, 0.0, 100.0, 100.0);
        let bytes = encode_to_vec(&model, &area).unwrap();

        assert_eq!(&bytes[0..4], b"TMV\0");
        assert_eq!(&bytes[4..8], &[1, 0, 0, 0]);
        let field = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        assert_eq!(field(8), 40);
        assert_eq!(field(12), 32);
        assert_eq!(field(16), 8 * 32);
        assert_eq!(field(20), 8 * 40);
        assert_eq!(field(24), 8);
        assert_eq!(field(28), 0);
        assert_eq!(field(32), 8);
        assert_eq!(bytes.len(), HEADER_SIZE + 40 + 32 + 8 * 32 + 8 * 40);
    }

    #[test]
    fn round_trip_restores_every_field() {
        let model = nested_model();
        let area = Rect::new(99, 0.0, 0.0, 100.0, 100.0);
        let bytes = encode_to_vec(&model, &area).unwrap();

        let view = decode(&bytes).unwrap();
        assert_eq!(view.area(), area);
        assert_eq!(view.stats(), model.stats);
        assert_eq!(view.items_len(), 8);
        assert_eq!(view.rects_len(), 8);
        assert_eq!(view.item(4).map(|i| i.id), Some(ItemId(5)));
        assert_eq!(view.rect(7), model.rects.get(7).copied());

        assert_eq!(view.to_model(), model);
    }

    #[test]
    fn user_data_trailer_round_trips() {
        let items = vec![
            Item::root(1, 3.0).with_user_data(vec![1, 2]),
            Item::root(2, 1.0).with_user_data(vec![3, 4]),
        ];
        let mut model = Model::new(items).with_user_data_size(2);
        layout(&mut model, Rect::from_size(10.0, 10.0)).unwrap();

        let bytes = encode_to_vec(&model, &Rect::from_size(10.0, 10.0)).unwrap();
        let view = decode(&bytes).unwrap();
        let trailers: Vec<&[u8]> = view.items().map(|i| i.user_data).collect();
        assert_eq!(trailers, vec![&[1u8, 2][..], &[3u8, 4][..]]);
    }

    #[test]
    fn mismatched_user_data_is_rejected() {
        let model = Model::new(vec![Item::root(1, 1.0).with_user_data(vec![1])]).with_user_data_size(2);
        let err = encode_to_vec(&model, &Rect::from_size(1.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            CodecError::UserDataSize {
                id: ItemId(1),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn encode_into_short_buffer_reports_required_size() {
        let model = nested_model();
        let mut buf = [0xAAu8; 64];
        let err = encode(&model, &Rect::from_size(100.0, 100.0), &mut buf).unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferTooSmall {
                required: encoded_len(&model),
                capacity: 64
            }
        );
        assert!(buf.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn decode_rejects_bad_headers() {
        let model = nested_model();
        let good = encode_to_vec(&model, &Rect::from_size(100.0, 100.0)).unwrap();

        assert!(matches!(decode(&good[..10]), Err(CodecError::Truncated { needed: 36, actual: 10 })));

        let mut bad = good.clone();
        bad[0] = b'X';
        assert_eq!(decode(&bad).unwrap_err(), CodecError::BadMagic(*b"XMV\0"));

        let mut bad = good.clone();
        bad[4] = 2;
        assert_eq!(decode(&bad).unwrap_err(), CodecError::UnsupportedVersion(2));

        let mut bad = good.clone();
        bad[6] = 1;
        assert_eq!(decode(&bad).unwrap_err(), CodecError::BadPadding([0, 1, 0]));

        let mut bad = good.clone();
        bad[8] = 41;
        assert!(matches!(decode(&bad), Err(CodecError::RecordSize { record: "area", .. })));

        let mut bad = good.clone();
        bad[24] = 9;
        assert!(matches!(decode(&bad), Err(CodecError::BlockSize { block: "items", .. })));

        assert!(matches!(
            decode(&good[..good.len() - 1]),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn failed_decode_leaves_model_untouched() {
        let mut target = nested_model();
        let before = target.clone();
        let mut bytes = encode_to_vec(&before, &Rect::from_size(100.0, 100.0)).unwrap();
        bytes[1] = 0;
        assert!(decode_into(&mut target, &bytes).is_err());
        assert_eq!(target, before);
    }

    #[test]
    fn out_of_range_record_index_is_none() {
        let model = nested_model();
        let bytes = encode_to_vec(&model, &Rect::from_size(100.0, 100.0)).unwrap();
        let view = decode(&bytes).unwrap();

        assert!(view.item(view.items_len()).is_none());
        assert!(view.rect(view.rects_len()).is_none());
        // start fits in usize but start + record size does not
        assert!(view.item(usize::MAX / ITEM_RECORD_SIZE).is_none());
        assert!(view.rect(usize::MAX / RECT_RECORD_SIZE).is_none());
        assert!(view.item(usize::MAX).is_none());
    }
}
