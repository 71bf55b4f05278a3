/// Console presenter: frames a multi-line reply in an indented box.
///
/// The core hands over plain text; all framing decisions live here.
pub fn render(message: &str) {
    const HORIZONTAL_LINE: &str =
        "    ____________________________________________________________";
    println!("{HORIZONTAL_LINE}");
    for line in message.lines() {
        println!("     {line}");
    }
    println!("{HORIZONTAL_LINE}");
    println!();
}
