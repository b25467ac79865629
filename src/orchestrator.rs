//! Spawns the worker pool, seeds the queue, awaits quiescence, and shuts
//! everything down (§4.7).

use std::sync::Arc;
use std::thread;

use crate::filesystem;
use crate::flagman::Flagman;
use crate::ignore::{GlobalIgnore, IgnoreRuleset};
use crate::options::Options;
use crate::queue::WorkQueue;
use crate::walk::{self, PathJob};

/// A queue payload: either real work or a worker-shutdown sentinel (§9:
/// "Worker shutdown via null-sentinel messages").
enum Task {
    Job(PathJob),
    Terminate,
}

/// Run a full search to completion: seed the queue with one job per start
/// path, spawn `options.nthreads` workers, and block until the flagman
/// reports every job has drained before shutting the pool down.
pub fn run(options: Arc<Options>, global_ignore: Option<Arc<GlobalIgnore>>) {
    let queue: Arc<WorkQueue<Task>> = Arc::new(WorkQueue::new());
    let flagman = Arc::new(Flagman::new());
    let nthreads = options.nthreads.max(1);

    // Held "busy" until seeding completes, so a fast worker can never
    // observe a transient all-zero count before every seed job exists
    // (§4.7 steps 2 and 5).
    flagman.acquire();

    let workers: Vec<_> = (0..nthreads)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let flagman = Arc::clone(&flagman);
            let options = Arc::clone(&options);
            let global_ignore = global_ignore.clone();
            thread::spawn(move || worker_loop(queue, flagman, options, global_ignore))
        })
        .collect();

    for path in &options.paths {
        let resolved = if options.absolute {
            filesystem::absolute_path(path).unwrap_or_else(|_| path.clone())
        } else {
            // Stripping "./" from a seed that is *only* "./" or "." would
            // leave an empty path, which `read_dir` rejects outright — the
            // seed itself must stay joinable, unlike an already-printed
            // child path (§4.5 step 3: "parent + / + name").
            let stripped = filesystem::strip_current_dir(path);
            if stripped.as_os_str().is_empty() {
                path.clone()
            } else {
                stripped.to_path_buf()
            }
        };
        let ruleset = if options.no_ignore {
            None
        } else {
            IgnoreRuleset::parse(&resolved)
        };
        flagman.acquire();
        queue.put_head(Task::Job(PathJob {
            depth: 0,
            path: resolved,
            ignore: ruleset,
        }));
    }

    flagman.release();
    flagman.wait();

    for _ in 0..nthreads {
        queue.put_tail(Task::Terminate);
    }

    for worker in workers {
        let _ = worker.join();
    }
}

fn worker_loop(
    queue: Arc<WorkQueue<Task>>,
    flagman: Arc<Flagman>,
    options: Arc<Options>,
    global_ignore: Option<Arc<GlobalIgnore>>,
) {
    let mut scratch = options.matcher.new_scratch();

    loop {
        let job = match queue.get() {
            Task::Terminate => break,
            Task::Job(job) => job,
        };
        let depth = job.depth;

        if let Some(scan) =
            walk::scan_directory(&job, &options, global_ignore.as_deref(), &mut scratch)
        {
            if !scan.matches.is_empty() {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                for path in &scan.matches {
                    if walk::emit(path, &options, &mut handle).is_err() {
                        break;
                    }
                }
            }

            for (child_path, child_ignore) in scan.children {
                flagman.acquire();
                queue.put(
                    Task::Job(PathJob {
                        depth: depth + 1,
                        path: child_path,
                        ignore: child_ignore,
                    }),
                    depth as i64 + 1,
                );
            }
        }

        flagman.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn options_for(paths: Vec<PathBuf>, nthreads: usize) -> Arc<Options> {
        Arc::new(Options {
            matcher: Matcher::build(None, false, false).unwrap(),
            type_filter: None,
            skip_hidden: true,
            no_ignore: false,
            max_depth: None,
            colorize: false,
            nthreads,
            extension: None,
            delimiter: b'\n',
            absolute: false,
            paths,
        })
    }

    #[test]
    fn run_drains_without_deadlock_single_threaded() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/c.txt"), "").unwrap();

        run(options_for(vec![dir.path().to_path_buf()], 1), None);
    }

    #[test]
    fn run_drains_without_deadlock_multi_threaded() {
        let dir = tempdir().unwrap();
        for i in 0..8 {
            fs::create_dir_all(dir.path().join(format!("d{i}"))).unwrap();
            fs::write(dir.path().join(format!("d{i}/f.txt")), "").unwrap();
        }

        run(options_for(vec![dir.path().to_path_buf()], 4), None);
    }
}
