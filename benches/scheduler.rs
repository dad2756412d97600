/**
 *     ______     ______     ______     ______     ______
 *    /\  ___\   /\  == \   /\  ___\   /\  ___\   /\__  _\
 *    \ \ \____  \ \  __<   \ \  __\   \ \___  \  \/_/\ \/
 *     \ \_____\  \ \_\ \_\  \ \_____\  \/\_____\    \ \_\
 *      \/_____/   \/_/ /_/   \/_____/   \/_____/     \/_/
 *
 * Author: Colin MacRitchie / Ripple Group
 */
/* Benchmarks for scheduler operations */
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use crest::{Scheduler, Task, TaskId};

const N: u64 = 1024;

fn random_tasks(n: u64) -> Vec<Task> {
    fastrand::seed(0x5eed);
    (1..=n)
        .map(|id| Task::new(TaskId(id), fastrand::i64(-1_000_000..1_000_000)))
        .collect()
}

fn populated(n: u64) -> Scheduler {
    let mut scheduler = Scheduler::with_capacity(n as usize);
    for task in random_tasks(n) {
        scheduler.add_task(task);
    }
    scheduler
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler/insert");

    group.bench_function("ascending", |b| {
        b.iter_batched(
            || Scheduler::with_capacity(N as usize),
            |mut scheduler| {
                for id in 1..=N {
                    scheduler.add_task(Task::new(TaskId(id), id as i64));
                }
                black_box(scheduler.len())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("descending", |b| {
        b.iter_batched(
            || Scheduler::with_capacity(N as usize),
            |mut scheduler| {
                for id in 1..=N {
                    scheduler.add_task(Task::new(TaskId(id), -(id as i64)));
                }
                black_box(scheduler.len())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("random", |b| {
        let tasks = random_tasks(N);
        b.iter_batched(
            || (Scheduler::with_capacity(N as usize), tasks.clone()),
            |(mut scheduler, tasks)| {
                for task in tasks {
                    scheduler.add_task(task);
                }
                black_box(scheduler.len())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_extract_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler/extract");

    for size in [256u64, 1024, 4096] {
        group.bench_with_input(BenchmarkId::new("drain", size), &size, |b, &size| {
            b.iter_batched(
                || populated(size),
                |mut scheduler| {
                    while let Some(task) = scheduler.take_task() {
                        black_box(task);
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_change_priority(c: &mut Criterion) {
    let mut scheduler = populated(N);
    fastrand::seed(0xc4e57);

    c.bench_function("scheduler/change_priority", |b| {
        b.iter(|| {
            let id = TaskId(fastrand::u64(1..=N));
            let priority = fastrand::i64(-1_000_000..1_000_000);
            black_box(scheduler.change_task_priority(id, priority))
        });
    });
}

fn bench_mixed_workload(c: &mut Criterion) {
    c.bench_function("scheduler/mixed_workload", |b| {
        let mut scheduler = populated(N);
        fastrand::seed(0x717e);
        let mut next_id = N + 1;

        /* Steady-state churn: one extraction, one insertion, one update */
        b.iter(|| {
            if let Some(task) = scheduler.take_task() {
                black_box(task);
            }
            scheduler.add_task(Task::new(
                TaskId(next_id),
                fastrand::i64(-1_000_000..1_000_000),
            ));
            next_id += 1;
            scheduler.change_task_priority(
                TaskId(fastrand::u64(1..next_id)),
                fastrand::i64(-1_000_000..1_000_000),
            );
        });
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_extract_all,
    bench_change_priority,
    bench_mixed_workload
);

criterion_main!(benches);
