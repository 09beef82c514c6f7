/// Split `items` into exactly `cols` ordered columns of similar weight.
///
/// Items are taken from the end, filling each column up to
/// `total / cols`; an item that would overflow the target opens a new
/// column, and once `cols` columns exist the first one (in reverse order)
/// absorbs the rest. Concatenating the columns gives back `items`. Empty
/// columns only appear as padding at the end.
pub fn split_columns<T, F>(items: Vec<T>, cols: usize, weight: F) -> Vec<Vec<T>>
where
    F: Fn(&T) -> usize,
{
    let cols = cols.max(1);
    let weighted: Vec<(usize, T)> = items.into_iter().map(|item| (weight(&item), item)).collect();
    let grand_total: usize = weighted.iter().map(|(w, _)| w).sum();
    let target = grand_total / cols;

    let mut current = 0;
    let mut output: Vec<Vec<T>> = vec![Vec::new()];
    for (w, item) in weighted.into_iter().rev() {
        current += w;
        if output.len() >= cols {
            push_last(&mut output, item);
        } else if current > target {
            output.push(vec![item]);
            current = w;
        } else if current == target {
            push_last(&mut output, item);
            output.push(Vec::new());
            current = 0;
        } else {
            push_last(&mut output, item);
        }
    }

    output.reverse();
    for column in output.iter_mut() {
        column.reverse();
    }
    output.retain(|column| !column.is_empty());
    output.resize_with(cols.max(output.len()), Vec::new);
    output
}

fn push_last<T>(output: &mut [Vec<T>], item: T) {
    if let Some(last) = output.last_mut() {
        last.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lens<T>(columns: &[Vec<T>]) -> Vec<usize> {
        columns.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_even_split() {
        let columns = split_columns((1..=6).collect(), 2, |_| 1);
        assert_eq!(columns, vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn test_more_columns_than_target() {
        let columns = split_columns((1..=6).collect(), 4, |_| 1);
        assert_eq!(columns, vec![vec![1, 2, 3], vec![4], vec![5], vec![6]]);
    }

    #[test]
    fn test_pads_with_empty_columns() {
        let columns = split_columns(vec!['a', 'b'], 4, |_| 1);
        assert_eq!(lens(&columns), vec![1, 1, 0, 0]);

        let columns: Vec<Vec<u8>> = split_columns(Vec::new(), 3, |_| 1);
        assert_eq!(lens(&columns), vec![0, 0, 0]);
    }

    #[test]
    fn test_weighted_items() {
        // weights: a=4, b=1, c=1, d=2 -> target 4
        let items = vec![('a', 4), ('b', 1), ('c', 1), ('d', 2)];
        let columns = split_columns(items, 2, |(_, w)| *w);
        let names: Vec<Vec<char>> = columns
            .iter()
            .map(|c| c.iter().map(|(n, _)| *n).collect())
            .collect();
        assert_eq!(names, vec![vec!['a'], vec!['b', 'c', 'd']]);
    }

    #[test]
    fn test_single_column_and_zero() {
        let columns = split_columns(vec![1, 2, 3], 1, |_| 1);
        assert_eq!(columns, vec![vec![1, 2, 3]]);
        let columns = split_columns(vec![1, 2, 3], 0, |_| 1);
        assert_eq!(columns, vec![vec![1, 2, 3]]);
    }
}
