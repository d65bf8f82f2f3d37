//! CLI Commands for the filesystem service
//!
//! This module turns one line of text into one service call and renders the
//! result.

use services_filesys::{FileSystemOperations, FileSystemService, FsResult, ReadCursor, User};

/// Size of the buffer used by `cat`
const READ_CHUNK: usize = 1024;

/// CLI Command handler
pub struct CommandHandler {
    /// Filesystem service
    pub fs_service: FileSystemService,
    /// Acting user for every command
    pub user: String,
}

impl CommandHandler {
    /// Creates a handler over a fresh filesystem, acting as root
    pub fn new() -> Self {
        Self::with_service(FileSystemService::new())
    }

    /// Creates a handler over an existing service, acting as its admin
    pub fn with_service(fs_service: FileSystemService) -> Self {
        let user = fs_service.users().admin().to_string();
        Self { fs_service, user }
    }

    /// Parses and runs one command line
    ///
    /// Example: `execute("ls -r /home")`
    pub fn execute(&mut self, line: &str) -> Result<String, String> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(String::new());
        };
        let (recursive, args): (Vec<&str>, Vec<&str>) = words.partition(|w| *w == "-r");
        let recursive = !recursive.is_empty();

        match (command, args.as_slice()) {
            ("mkdir", [path]) => self.run(command, |s, u| s.mkdir(path, u)),
            ("touch", [path]) => self.run(command, |s, u| s.touch(path, u)),
            ("write", [path, text @ ..]) => self.write(path, &text.join(" "), false),
            ("append", [path, text @ ..]) => self.write(path, &text.join(" "), true),
            ("cat", [path]) => self.cat(path),
            ("rm", [path]) => self.run(command, |s, u| s.rm(path, u, recursive)),
            ("mv", [old, new]) => self.run(command, |s, u| s.mv(old, new, u)),
            ("cp", [src, dst]) => self.run(command, |s, u| s.cp(src, dst, u, recursive)),
            ("ls", []) => self.ls("/", recursive),
            ("ls", [path]) => self.ls(path, recursive),
            ("chmod", [path, target, mode]) => {
                self.run(command, |s, u| s.chmod(path, u, target, mode))
            }
            ("stat", [path]) => self.stat(path),
            ("adduser", [name, mode, home]) => self.add_user(name, mode, home),
            ("userdel", [name]) => self.run(command, |s, _| s.remove_user(name)),
            ("su", [name]) => self.switch_user(name),
            ("whoami", []) => Ok(self.user.clone()),
            ("users", []) => Ok(self.users()),
            ("help", []) => Ok(Self::help().to_string()),
            _ => Err(format!("unknown or malformed command: {}", line.trim())),
        }
    }

    /// Runs a mutating operation as the acting user
    fn run<F>(&mut self, command: &str, op: F) -> Result<String, String>
    where
        F: FnOnce(&mut FileSystemService, &str) -> FsResult<()>,
    {
        op(&mut self.fs_service, &self.user)
            .map(|_| String::new())
            .map_err(|e| format!("{} failed: {}", command, e))
    }

    /// Writes text to a file
    ///
    /// Example: `write notes.txt hello world`
    pub fn write(&mut self, path: &str, text: &str, append: bool) -> Result<String, String> {
        self.fs_service
            .write(path, &self.user, append, text.as_bytes())
            .map_err(|e| format!("write failed: {}", e))?;
        Ok(String::new())
    }

    /// Reads a whole file as text
    ///
    /// Example: `cat docs/notes.txt`
    pub fn cat(&self, path: &str) -> Result<String, String> {
        let mut cursor = ReadCursor::default();
        let mut buffer = [0u8; READ_CHUNK];
        let mut content = Vec::new();

        loop {
            let read = self
                .fs_service
                .read(path, &self.user, &mut buffer, &mut cursor)
                .map_err(|e| format!("cat failed: {}", e))?;
            if read == 0 {
                break;
            }
            content.extend_from_slice(&buffer[..read]);
        }

        Ok(String::from_utf8_lossy(&content).into_owned())
    }

    /// Lists a directory
    ///
    /// Example: `ls -r docs`
    pub fn ls(&self, path: &str, recursive: bool) -> Result<String, String> {
        self.fs_service
            .ls(path, &self.user, recursive)
            .map_err(|e| format!("ls failed: {}", e))
    }

    /// Displays node information
    ///
    /// Example: `stat docs/notes.txt`
    pub fn stat(&self, path: &str) -> Result<String, String> {
        let stat_info = self
            .fs_service
            .stat(path, &self.user)
            .map_err(|e| format!("stat failed: {}", e))?;

        let mut output = format!("Name: {}\n", stat_info.name);
        output.push_str(&format!("Kind: {}\n", stat_info.kind));
        output.push_str(&format!("Owner: {}\n", stat_info.owner));
        output.push_str(&format!("Access: {}\n", stat_info.access));
        if let Some(size) = stat_info.size {
            output.push_str(&format!("Size: {} bytes\n", size));
        }
        if let Some(blocks) = stat_info.block_count {
            output.push_str(&format!("Blocks: {}\n", blocks));
        }
        if let Some(count) = stat_info.entry_count {
            output.push_str(&format!("Entries: {}\n", count));
        }

        Ok(output)
    }

    /// Registers a user
    ///
    /// Example: `adduser alice rwx /home/alice`
    pub fn add_user(&mut self, name: &str, mode: &str, home: &str) -> Result<String, String> {
        let user = User::parse(name, mode, home).map_err(|e| format!("adduser failed: {}", e))?;
        self.fs_service
            .add_user(user)
            .map_err(|e| format!("adduser failed: {}", e))?;
        Ok(format!("Added user {}", name))
    }

    /// Switches the acting user
    ///
    /// Example: `su alice`
    pub fn switch_user(&mut self, name: &str) -> Result<String, String> {
        if !self.fs_service.users().contains(name) {
            return Err(format!("su failed: unknown user {}", name));
        }
        self.user = name.to_string();
        Ok(String::new())
    }

    fn users(&self) -> String {
        self.fs_service
            .users()
            .iter()
            .map(|user| format!("{}\n", user))
            .collect()
    }

    fn help() -> &'static str {
        "mkdir <path> | touch <path> | write <path> <text> | append <path> <text>\n\
         cat <path> | rm [-r] <path> | mv <old> <new> | cp [-r] <src> <dir>\n\
         ls [-r] [path] | chmod <path> <user> <rwx> | stat <path>\n\
         adduser <name> <rwx> <home> | userdel <name> | su <name> | whoami | users\n"
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
