//! Aligned, plain-text tables.

use std::fmt::{self, Display};
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

pub trait TableDisplay {
    fn columns() -> usize;
    fn column_name(column_index: usize) -> &'static str;
    fn item(&self, column_index: usize) -> &str;
}

pub fn display_table<Row: TableDisplay>(rows: &[Row], mut output: impl Write) -> io::Result<()> {
    let column_count = Row::columns();
    let mut column_widths = (0..column_count)
        .map(|column_index| Row::column_name(column_index).width())
        .collect::<Vec<_>>();

    for row in rows {
        for (column_index, width) in column_widths.iter_mut().enumerate() {
            *width = std::cmp::max(row.item(column_index).width(), *width);
        }
    }

    output_row(&mut output, column_count, |column_index| {
        Padded(Row::column_name(column_index), column_widths[column_index])
    })?;
    output_row(&mut output, column_count, |column_index| {
        Divider(column_widths[column_index])
    })?;
    for row in rows {
        output_row(&mut output, column_count, |column_index| {
            Padded(row.item(column_index), column_widths[column_index])
        })?;
    }

    Ok(())
}

fn output_row<F, D>(
    mut output: impl Write,
    column_count: usize,
    get_column_display: F,
) -> io::Result<()>
where
    D: Display,
    F: Fn(usize) -> D,
{
    for column_index in 0..column_count {
        if column_index != 0 {
            write!(&mut output, "  ")?;
        }
        write!(&mut output, "{}", get_column_display(column_index))?;
    }
    writeln!(&mut output)?;
    Ok(())
}

struct Divider(usize);

impl Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            write!(f, "─")?;
        }
        Ok(())
    }
}

struct Padded<'a>(&'a str, usize);

impl Display for Padded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padding = self.1.saturating_sub(self.0.width());
        write!(f, "{}{:padding$}", self.0, "")
    }
}

#[cfg(test)]
mod tests {
    use super::{display_table, TableDisplay};

    struct Pair(&'static str, String);

    impl TableDisplay for Pair {
        fn columns() -> usize {
            2
        }

        fn column_name(column_index: usize) -> &'static str {
            ["Key", "Value"][column_index]
        }

        fn item(&self, column_index: usize) -> &str {
            match column_index {
                0 => self.0,
                _ => &self.1,
            }
        }
    }

    #[test]
    fn columns_are_padded_to_the_widest_cell() {
        let rows = [Pair("a", "1".to_owned()), Pair("wide key", "口口".to_owned())];
        let mut out = Vec::new();
        display_table(&rows, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Key       Value");
        assert_eq!(lines[1], "────────  ─────");
        assert_eq!(lines[2], "a         1    ");
        assert_eq!(lines[3], "wide key  口口 ");
    }
}
