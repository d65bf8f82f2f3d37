//! Example demonstrating the filesystem service
//!
//! Builds a small tree, writes a file larger than one block, provisions a
//! second user and shows how access overrides change what they can do.

use filesys_console::commands::CommandHandler;

fn main() {
    env_logger::init();
    println!("=== Filesys Demo ===\n");

    let mut handler = CommandHandler::new();

    println!("1. Creating directory structure...");
    handler.execute("mkdir /docs/drafts").expect("Failed to create docs");
    handler.execute("mkdir /projects").expect("Failed to create projects");
    println!("   Created: /docs/drafts");
    println!("   Created: /projects\n");

    println!("2. Writing a multi-block file...");
    handler.execute("touch /docs/readme.md").expect("Failed to touch readme");
    let body = "filesys ".repeat(1024);
    handler
        .write("/docs/readme.md", &body, false)
        .expect("Failed to write readme");
    print!("{}", handler.stat("/docs/readme.md").expect("Failed to stat readme"));
    println!();

    println!("3. Recursive listing...");
    print!("{}", handler.ls("/", true).expect("Failed to list root"));
    println!();

    println!("4. Adding user alice...");
    handler
        .add_user("alice", "rw-", "/home/alice")
        .expect("Failed to add alice");
    handler.switch_user("alice").expect("Failed to switch user");
    handler
        .execute("touch /home/alice/todo.txt")
        .expect("Failed to touch todo");
    match handler.execute("touch /projects/plan.txt") {
        Ok(_) => println!("   unexpected: alice wrote to /projects"),
        Err(e) => println!("   denied as expected: {}", e),
    }

    println!("\n5. Granting alice write on /projects...");
    handler.switch_user("root").expect("Failed to switch user");
    handler
        .execute("chmod /projects alice rw-")
        .expect("Failed to chmod");
    handler.switch_user("alice").expect("Failed to switch user");
    handler
        .execute("touch /projects/plan.txt")
        .expect("Failed to touch plan");
    print!("{}", handler.ls("/projects", false).expect("Failed to list projects"));

    println!("\n=== Demo Complete ===");
}
