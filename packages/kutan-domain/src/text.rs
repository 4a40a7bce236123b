use kutan_config::TextMatch;

/// Case-insensitive, literal name filter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextFilter {
	query: String,
	mode: TextMatch,
}
impl TextFilter {
	pub fn new(query: String, mode: TextMatch) -> Self {
		Self { query, mode }
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn mode(&self) -> TextMatch {
		self.mode
	}

	/// Whether any stored name can match. Text columns never hold NUL, so a query
	/// containing one matches nothing and must not reach the database as a parameter.
	pub fn is_satisfiable(&self) -> bool {
		!self.query.contains('\0')
	}

	/// In-process evaluation. Must agree with [`TextFilter::like_pattern`] under `ILIKE`.
	pub fn matches(&self, name: &str) -> bool {
		if !self.is_satisfiable() {
			return false;
		}

		let name = name.to_lowercase();
		let query = self.query.to_lowercase();

		match self.mode {
			TextMatch::Contains => name.contains(&query),
			TextMatch::Prefix => name.starts_with(&query),
		}
	}

	/// `ILIKE` pattern for the query, using `\` as the escape character.
	pub fn like_pattern(&self) -> String {
		let escaped = escape_like(&self.query);

		match self.mode {
			TextMatch::Contains => format!("%{escaped}%"),
			TextMatch::Prefix => format!("{escaped}%"),
		}
	}
}

fn escape_like(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());

	for ch in raw.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}
