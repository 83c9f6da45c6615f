use crate::error::{AppError, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// 1-indexed pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    pub fn new(number: i64, size: i64) -> Result<Self> {
        if number < 1 || number > i64::from(u32::MAX) {
            return Err(AppError::Validation("page must be >= 1".to_string()));
        }
        if size < 1 || size > i64::from(MAX_PAGE_SIZE) {
            return Err(AppError::Validation(format!(
                "page size must be 1-{}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(Self {
            number: number as u32,
            size: size as u32,
        })
    }

    /// Page `number` with the default size of 10.
    pub fn number(number: i64) -> Result<Self> {
        Self::new(number, i64::from(DEFAULT_PAGE_SIZE))
    }

    pub fn first() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn page(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.number) - 1) * i64::from(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first()
    }
}
