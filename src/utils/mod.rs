mod timeit;
