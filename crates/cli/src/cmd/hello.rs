pub fn cmd_hello(name: &str) {
  println!("Hello, {}!", name);
}
