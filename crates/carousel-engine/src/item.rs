use std::hash::Hash;

/// Caller-owned carousel item.
///
/// The engine only reads a key so view layers can diff placements; item
/// content is never inspected, cloned or mutated.
pub trait CarouselItem {
    type Key: Clone + Eq + Hash;

    fn key(&self) -> Self::Key;
}

macro_rules! impl_carousel_item_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CarouselItem for $ty {
                type Key = $ty;

                fn key(&self) -> Self::Key {
                    *self
                }
            }
        )*
    };
}

impl_carousel_item_by_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, char);

impl CarouselItem for String {
    type Key = String;

    fn key(&self) -> Self::Key {
        self.clone()
    }
}

impl CarouselItem for &'static str {
    type Key = &'static str;

    fn key(&self) -> Self::Key {
        *self
    }
}
