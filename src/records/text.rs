use std::{fmt, ops};

use derive_more::{Display, Error};
use serde::Serialize;

/// A non-empty string of at most `MAX` characters.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BoundedText<const MAX: usize>(String);

/// Reasons a string can be rejected by [`BoundedText::new()`].
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum TextError
{
	#[display("must not be empty")]
	Empty,

	#[display("must not be longer than {max} characters")]
	TooLong { max: usize },
}

impl<const MAX: usize> BoundedText<MAX>
{
	pub fn new(value: String) -> Result<Self, TextError>
	{
		if value.is_empty() {
			return Err(TextError::Empty);
		}

		if value.chars().count() > MAX {
			return Err(TextError::TooLong { max: MAX });
		}

		Ok(Self(value))
	}

	pub fn as_str(&self) -> &str
	{
		&self.0
	}

	pub fn into_inner(self) -> String
	{
		self.0
	}
}

impl<const MAX: usize> fmt::Debug for BoundedText<MAX>
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Debug::fmt(&self.0, fmt)
	}
}

impl<const MAX: usize> fmt::Display for BoundedText<MAX>
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Display::fmt(&self.0, fmt)
	}
}

impl<const MAX: usize> ops::Deref for BoundedText<MAX>
{
	type Target = str;

	fn deref(&self) -> &Self::Target
	{
		&self.0
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[test]
	fn accepts_exactly_max_chars() -> testing::Result
	{
		let text = BoundedText::<3>::new(String::from("abc"))?;

		testing::assert_eq!(text.as_str(), "abc");

		Ok(())
	}

	#[test]
	fn rejects_empty() -> testing::Result
	{
		testing::assert_eq!(BoundedText::<3>::new(String::new()), Err(TextError::Empty));

		Ok(())
	}

	#[test]
	fn rejects_too_long() -> testing::Result
	{
		testing::assert_eq!(
			BoundedText::<3>::new(String::from("abcd")),
			Err(TextError::TooLong { max: 3 })
		);

		Ok(())
	}

	#[test]
	fn counts_chars_not_bytes() -> testing::Result
	{
		// 3 characters, 9 bytes
		let text = BoundedText::<3>::new(String::from("日本語"))?;

		testing::assert_eq!(text.len(), 9);

		Ok(())
	}
}
