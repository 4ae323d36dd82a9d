use duplex::prelude::*;

fn cell<'a>() -> impl Printer<&'a str, Output = &'a str> + Copy {
    take_while::<_, &'a str>(|c: &char| *c != ',' && *c != '\n')
}

fn row<'a>() -> impl Printer<&'a str, Output = Vec<&'a str>> {
    cell().separated_by(just(',')).at_least(1)
}

fn table<'a>() -> impl Printer<&'a str, Output = Vec<Vec<&'a str>>> {
    row().then_ignore(newline()).many()
}

#[test]
fn nested_repetition_round_trips() {
    let input = "a,b,c\n1,,3\n\n";

    let rows = table().parse_all(input).unwrap();
    assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "", "3"], vec![""]]);
    assert_eq!(table().print_to_buffer(rows), Ok(input.to_string()));
}

#[test]
fn empty_cells_still_progress() {
    // Each empty cell is followed by a separator that does consume input.
    let mut input = ",,,";
    assert_eq!(row().parse(&mut input), Ok(vec!["", "", "", ""]));
    assert_eq!(input, "");
}

#[test]
fn bounded_table() {
    let two_rows = row().then_ignore(newline()).many().exactly(2);

    let mut input = "a\nb\nc\n";
    assert_eq!(two_rows.parse(&mut input), Ok(vec![vec!["a"], vec!["b"]]));
    assert_eq!(input, "c\n");

    let mut input = "a\n";
    assert_eq!(two_rows.parse(&mut input), Err(Error::Parse));
    assert_eq!(input, "a\n");

    assert_eq!(two_rows.print_to_buffer(vec![vec!["a"]]), Err(Error::Print));
    assert_eq!(
        two_rows.print_to_buffer(vec![vec!["a"], vec!["b"], vec!["c"]]),
        Err(Error::Print),
    );
}

#[test]
fn fold_and_decompose_over_bytes() {
    // Run-length encoding: "aaab" parses to [(b'a', 3), (b'b', 1)] and prints back.
    let byte = any::<&[u8]>();
    let runs = byte
        .many()
        .at_least(1)
        .fold(Vec::new, |runs: &mut Vec<(u8, usize)>, b: u8| {
            if let Some((last, count)) = runs.last_mut() {
                if *last == b {
                    *count += 1;
                    return;
                }
            }
            runs.push((b, 1));
        })
        .decompose(|runs: Vec<(u8, usize)>| {
            runs.into_iter()
                .flat_map(|(b, count)| core::iter::repeat(b).take(count))
                .collect::<Vec<_>>()
        });

    let parsed = runs.parse_all(&b"aaabcc"[..]).unwrap();
    assert_eq!(parsed, vec![(b'a', 3), (b'b', 1), (b'c', 2)]);
    assert_eq!(runs.print_to_buffer(parsed), Ok(b"aaabcc".to_vec()));
    assert_eq!(runs.print_to_buffer(vec![]), Err(Error::Print));
}

#[test]
fn alternative_separators() {
    let list = text::int::<u32, &str>().separated_by(just::<_, &str>(';').or(just(',')));

    assert_eq!(list.parse_all("1;2,3"), Ok(vec![1, 2, 3]));
    // Printing uses the first separator that prints.
    assert_eq!(list.print_to_buffer(vec![1, 2, 3]), Ok("1;2;3".to_string()));
}

#[test]
fn failed_repetition_inside_sequence_rolls_back_buffer() {
    let numbers = text::int::<u8, &str>().separated_by(just(',')).at_least(2);
    let labelled = just::<_, &str>("nums=").ignore_then(numbers);

    let mut buffer = String::from("x ");
    assert_eq!(labelled.print(vec![1], &mut buffer), Err(Error::Print));
    assert_eq!(buffer, "x ");
    assert_eq!(labelled.print(vec![1, 2], &mut buffer), Ok(()));
    assert_eq!(buffer, "x nums=1,2");
}
