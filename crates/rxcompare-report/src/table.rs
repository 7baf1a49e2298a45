//! A minimal grid table for terminal output.
//!
//! ```text
//! +-----------+--------+
//! | Medicine  | Annual |
//! +===========+========+
//! | Metformin | $220   |
//! +-----------+--------+
//! ```

/// Rows of text cells under a header line.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with empty cells; extra cells
    /// are dropped.
    pub fn push<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).take(self.headers.len()).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let rule = |fill: char| {
            let mut line = String::from("+");
            for w in &widths {
                line.extend(std::iter::repeat(fill).take(w + 2));
                line.push('+');
            }
            line
        };
        let line = |cells: &[String]| {
            let mut out = String::from("|");
            for (cell, w) in cells.iter().zip(&widths) {
                let pad = w - cell.chars().count();
                out.push(' ');
                out.push_str(cell);
                out.extend(std::iter::repeat(' ').take(pad + 1));
                out.push('|');
            }
            out
        };

        let mut out = Vec::with_capacity(self.rows.len() * 2 + 3);
        out.push(rule('-'));
        out.push(line(&self.headers));
        out.push(rule('='));
        for row in &self.rows {
            out.push(line(row));
            out.push(rule('-'));
        }
        out.join("\n")
    }
}
