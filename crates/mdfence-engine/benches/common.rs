// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\nParagraph with some content.\n\n<!-- eslint-disable no-console -->\n\n```js\nfunction example() {\n    console.log(\"Hello\");\n}\n```\n\n> Quoted:\n>\n> ```ts\n> const value: number = 1;\n> export default value;\n> ```\n\n";
    base.repeat(size)
}
